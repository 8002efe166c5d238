use regex::{Captures, Regex};
use std::sync::LazyLock;
use toml::{Table, Value};

// $$、$name、${name}；其他 `$` 原樣保留
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\})")
        .expect("placeholder pattern is valid")
});

/// 安全替換：找得到的佔位符換成值，找不到的保持原文，不會報錯
pub fn safe_substitute<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }

            let name = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();

            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// 以 TOML 表格作為替換來源
pub fn substitute_table(template: &str, vars: &Table) -> String {
    safe_substitute(template, |name| vars.get(name).map(value_to_text))
}

/// 將 TOML 值轉成放進文件的文字
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Table {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_unresolved_placeholder_left_verbatim() {
        let out = substitute_table("$foo $bar", &vars(&[("foo", "x")]));
        assert_eq!(out, "x $bar");
    }

    #[test]
    fn test_empty_mapping_is_noop() {
        assert_eq!(substitute_table("$foo $bar", &Table::new()), "$foo $bar");
    }

    #[test]
    fn test_braced_and_escaped() {
        let out = substitute_table("${name}s cost $$5, ${missing}", &vars(&[("name", "Book")]));
        assert_eq!(out, "Books cost $5, ${missing}");
    }

    #[test]
    fn test_extra_keys_ignored() {
        let out = substitute_table("+ $item", &vars(&[("item", "Read"), ("other", "z")]));
        assert_eq!(out, "+ Read");
    }

    #[test]
    fn test_identifier_stops_at_punctuation() {
        let out = substitute_table("$author. $title ($isbn)", &vars(&[("author", "Eco"), ("isbn", "123")]));
        assert_eq!(out, "Eco. $title (123)");
    }

    #[test]
    fn test_lone_dollar_kept() {
        assert_eq!(substitute_table("costs $ 5 and $1", &Table::new()), "costs $ 5 and $1");
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&Value::Integer(25)), "25");
        assert_eq!(value_to_text(&Value::Float(3.0)), "3.0");
        assert_eq!(value_to_text(&Value::Float(2.5)), "2.5");
        assert_eq!(value_to_text(&Value::Boolean(true)), "true");
        assert_eq!(value_to_text(&Value::String("a".into())), "a");
    }
}
