use toml::{Table, Value};

pub const DEFAULT_SEPARATOR: &str = "_";

/// 將巢狀配置攤平成單層，例如 `schedule.year` -> `schedule_year`
pub fn flatten_config(config: &Table) -> Table {
    flatten_with(config, DEFAULT_SEPARATOR)
}

/// 只遞迴進入表格；陣列與純量原樣保留。
/// 攤平後鍵名衝突時後寫入者覆蓋
pub fn flatten_with(config: &Table, sep: &str) -> Table {
    let mut flattened = Table::new();
    flatten_into(&mut flattened, config, "", sep);
    flattened
}

fn flatten_into(out: &mut Table, config: &Table, parent_key: &str, sep: &str) {
    for (key, value) in config {
        let new_key = if parent_key.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", parent_key, sep, key)
        };

        match value {
            Value::Table(nested) => flatten_into(out, nested, &new_key, sep),
            other => {
                out.insert(new_key, other.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested() {
        let config: Table = toml::from_str(
            r#"
e = 3

[a]
b = 1

[a.c]
d = 2
"#,
        )
        .unwrap();

        let flat = flatten_config(&config);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get("a_b"), Some(&Value::Integer(1)));
        assert_eq!(flat.get("a_c_d"), Some(&Value::Integer(2)));
        assert_eq!(flat.get("e"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_config(&Table::new()).is_empty());
    }

    #[test]
    fn test_lists_pass_through() {
        let config: Table = toml::from_str(
            r#"
[[book]]
title = "A"

[schedule]
exclude = ["01-15"]
"#,
        )
        .unwrap();

        let flat = flatten_config(&config);
        assert!(flat.get("book").unwrap().is_array());
        assert_eq!(
            flat.get("schedule_exclude"),
            Some(&Value::Array(vec![Value::String("01-15".into())]))
        );
    }

    #[test]
    fn test_collision_last_write_wins() {
        let config: Table = toml::from_str(
            r#"
a_b = "top"

[a]
b = "nested"
"#,
        )
        .unwrap();

        let flat = flatten_config(&config);
        assert_eq!(flat.get("a_b"), Some(&Value::String("nested".into())));
    }

    #[test]
    fn test_custom_separator() {
        let config: Table = toml::from_str("[course]\nnumber = 101\n").unwrap();
        let flat = flatten_with(&config, ".");
        assert_eq!(flat.get("course.number"), Some(&Value::Integer(101)));
    }
}
