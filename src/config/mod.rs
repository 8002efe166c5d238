pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::reference::MSR_PAGE;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SyllabusError};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_url, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "syllabus")]
#[command(about = "Compile course data into a Markdown file")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Write logs to stderr as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a schedule from a syllabus config
    Schedule {
        /// Syllabus config (.toml)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Compile Markdown from syllabus and schedule configs
    Compile {
        /// Syllabus config (.toml)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Course schedule (.toml); built from the config's [schedule] table when omitted
        #[arg(short, long, value_name = "SCHEDULE")]
        schedule: Option<PathBuf>,

        /// Templates (.md), concatenated in order
        #[arg(short, long, value_name = "FILES", num_args = 1.., required = true)]
        files: Vec<PathBuf>,
    },

    /// Download a minimum syllabus requirements .docx file
    Reference {
        /// Name of the output file (.docx); defaults to the linked file name
        #[arg(short, long, value_name = "FILENAME")]
        filename: Option<PathBuf>,

        /// Page listing the reference documents
        #[arg(long, default_value = MSR_PAGE)]
        page_url: String,

        #[arg(long, default_value = "30")]
        timeout_seconds: u64,

        #[arg(long, default_value = "3")]
        retry_attempts: u32,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Some(Command::Reference {
                page_url,
                timeout_seconds,
                ..
            }) => {
                validate_url("page_url", page_url)?;
                if *timeout_seconds == 0 {
                    return Err(SyllabusError::InvalidConfigValueError {
                        field: "timeout_seconds".to_string(),
                        value: timeout_seconds.to_string(),
                        reason: "Value must be at least 1".to_string(),
                    });
                }
                Ok(())
            }
            Some(Command::Compile { files, .. }) if files.is_empty() => {
                Err(SyllabusError::ConfigError {
                    message: "at least one template file is required".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compile() {
        let cli = CliConfig::try_parse_from([
            "syllabus", "compile", "-c", "syllabus.toml", "-f", "header.md", "body.md",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Compile {
                config,
                schedule,
                files,
            }) => {
                assert_eq!(config, PathBuf::from("syllabus.toml"));
                assert!(schedule.is_none());
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compile_requires_files() {
        assert!(CliConfig::try_parse_from(["syllabus", "compile", "-c", "s.toml"]).is_err());
    }

    #[test]
    fn test_no_subcommand_parses_to_none() {
        let cli = CliConfig::try_parse_from(["syllabus"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_reference_defaults_and_validation() {
        let cli = CliConfig::try_parse_from(["syllabus", "reference"]).unwrap();
        assert!(cli.validate().is_ok());

        let cli =
            CliConfig::try_parse_from(["syllabus", "reference", "--page-url", "ftp://x"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
