pub const DEFAULT_WIDTH: usize = 79;

/// 以空行分段後逐段重排到固定寬度。
///
/// 段內換行先合併成單一空格，再依單字邊界折行；超過寬度的單字獨佔一行，不拆字。
/// 段落之間保留一個空行，輸出首尾的空行會被移除。
pub fn wrap_paragraphs(text: &str, width: usize) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(fill(&current, width));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(fill(&current, width));
    }

    paragraphs.join("\n\n")
}

fn fill(lines: &[&str], width: usize) -> String {
    let mut output: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in lines.iter().flat_map(|l| l.split_whitespace()) {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            output.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        output.push(line);
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_paragraphs_keep_one_blank_line() {
        let out = wrap_paragraphs("line one\nline two\n\nsecond para", 10);
        assert_eq!(out, "line one\nline two\n\nsecond\npara");
        assert!(out.lines().all(|l| l.chars().count() <= 10));
        assert_eq!(out.matches("\n\n").count(), 1);
    }

    #[test]
    fn test_joins_lines_within_paragraph() {
        let out = wrap_paragraphs("a quick\nbrown fox", 79);
        assert_eq!(out, "a quick brown fox");
    }

    #[test]
    fn test_idempotent() {
        let text = "This course introduces the study of language as a formal object, \
                    with an emphasis on hands-on analysis.\n   \n\
                    Students will also read widely.";
        let once = wrap_paragraphs(text, 30);
        assert_eq!(wrap_paragraphs(&once, 30), once);
    }

    #[test]
    fn test_long_word_not_split() {
        let out = wrap_paragraphs("see https://example.com/a/very/long/path now", 10);
        assert_eq!(out, "see\nhttps://example.com/a/very/long/path\nnow");
    }

    #[test]
    fn test_leading_and_trailing_blank_lines_trimmed() {
        let out = wrap_paragraphs("\n\n  \nbody text  \n\n\n", 79);
        assert_eq!(out, "body text");
    }

    #[test]
    fn test_multiple_blank_lines_collapse() {
        assert_eq!(wrap_paragraphs("one\n\n\n\ntwo", 79), "one\n\ntwo");
    }
}
