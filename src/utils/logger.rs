use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// 函式庫與 `syllabus` 執行檔的事件目標不同，兩者都要列出
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "syllabus_compiler=debug,syllabus=debug,info"
    } else {
        "syllabus_compiler=info,syllabus=info"
    }
}

/// stdout 保留給輸出文件，日誌一律寫到 stderr
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 機器可讀的 JSON 日誌 (例如在 CI 中產生講義)
pub fn init_json_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(false)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_binary() {
        for verbose in [false, true] {
            let directive = default_directive(verbose);
            assert!(directive.contains("syllabus_compiler="));
            assert!(directive.split(',').any(|d| d.starts_with("syllabus=")));
            assert!(EnvFilter::try_new(directive).is_ok());
        }
    }
}
