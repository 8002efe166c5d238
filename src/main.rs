use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;
use syllabus_compiler::adapters::http::{HttpOptions, HttpReferenceSource};
use std::io::Write;
use syllabus_compiler::core::reference::{
    link_file_name, select_until_cancelled, PromptSelector, ReferenceDownloader,
};
use syllabus_compiler::domain::model::ScheduleDocument;
use syllabus_compiler::utils::error::ErrorSeverity;
use syllabus_compiler::utils::{logger, validation::Validate};
use syllabus_compiler::{
    CliConfig, Command, LocalStorage, Result, ScheduleBuilder, SyllabusConfig, SyllabusError,
    SyllabusRenderer,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let Some(command) = config.command.clone() else {
        let _ = CliConfig::command().print_help();
        std::process::exit(1);
    };

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 驗證參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 使用者取消不算失敗；直接結束以免等待仍在讀取 stdin 的阻塞執行緒
        if matches!(e, SyllabusError::Cancelled) {
            println!("\n{}", e);
            let _ = std::io::stdout().flush();
            std::process::exit(0);
        }

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Schedule { config } => {
            let syllabus = load_config(&config)?;
            let definition = syllabus.schedule_definition()?;
            let weeks = ScheduleBuilder::from_definition(&definition)?.build();
            println!("{}", syllabus_compiler::render_schedule_toml(&weeks));
        }
        Command::Compile {
            config,
            schedule,
            files,
        } => {
            let syllabus = load_config(&config)?;
            syllabus.validate()?;

            let document = match schedule {
                Some(path) => {
                    tracing::info!("📁 Loading schedule from: {}", path.display());
                    ScheduleDocument::from_file(&path)?
                }
                None => {
                    tracing::info!("📅 No schedule file given, building from [schedule]");
                    let definition = syllabus.schedule_definition()?;
                    ScheduleDocument::from_weeks(&ScheduleBuilder::from_definition(&definition)?.build())
                }
            };

            let templates = read_templates(&files).await?;
            let content = SyllabusRenderer::default().compile(&syllabus.table, &document, &templates)?;
            println!("{}", content);
        }
        Command::Reference {
            filename,
            page_url,
            timeout_seconds,
            retry_attempts,
        } => {
            let source = HttpReferenceSource::new(HttpOptions {
                timeout: Duration::from_secs(timeout_seconds),
                retry_attempts,
                ..HttpOptions::default()
            })?;
            let storage = LocalStorage::new(".".to_string());
            let downloader = ReferenceDownloader::new(source, storage, url::Url::parse(&page_url)?);

            let links = downloader.discover().await?;
            let names = links.iter().map(link_file_name).collect();
            let index = select_until_cancelled(
                || PromptSelector::new(std::io::stdin().lock(), std::io::stdout()),
                names,
                tokio::signal::ctrl_c(),
            )
            .await?;

            let filename = filename.map(|p| p.to_string_lossy().into_owned());
            let saved = downloader.download(&links, index, filename.as_deref()).await?;
            println!("Successfully downloaded: {}", saved);
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SyllabusConfig> {
    tracing::info!("📁 Loading configuration from: {}", path.display());
    SyllabusConfig::from_file(path)
}

async fn read_templates(files: &[PathBuf]) -> Result<Vec<String>> {
    let storage = LocalStorage::new(".".to_string());
    let mut templates = Vec::with_capacity(files.len());

    for file in files {
        tracing::debug!("📄 Reading template {}", file.display());
        templates.push(storage.read_text(&file.to_string_lossy()).await?);
    }

    Ok(templates)
}
