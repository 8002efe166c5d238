use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("Missing required field(s): {}", fields.join(", "))]
    MissingRequiredField { fields: Vec<String> },

    #[error("Invalid weekday(s) '{weekdays}'; select from 'MTWRF'")]
    InvalidWeekday { weekdays: String },

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Unsupported course designation: {code}")]
    UnsupportedDesignation { code: String },

    #[error("Template '{name}' not implemented")]
    TemplateNotFound { name: String },

    #[error("Download failed: {message} (requested: {url})")]
    FetchFailure { url: String, message: String },

    #[error("No .docx files found at {url}")]
    NoReferenceLinks { url: String },

    #[error("Selection {index} is out of range (1-{count})")]
    InvalidSelection { index: usize, count: usize },

    #[error("Download cancelled")]
    Cancelled,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Schedule,
    Template,
    Network,
    Io,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyllabusError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::InvalidSelection { .. }
            | Self::TomlError(_) => ErrorCategory::Validation,
            Self::InvalidWeekday { .. } | Self::InvalidDate { .. } => ErrorCategory::Schedule,
            Self::UnsupportedDesignation { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::Template
            }
            Self::FetchFailure { .. }
            | Self::NoReferenceLinks { .. }
            | Self::HttpError(_)
            | Self::UrlError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Io,
            Self::Cancelled => ErrorCategory::User,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::User => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Validation | ErrorCategory::Schedule | ErrorCategory::Template => {
                ErrorSeverity::High
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingRequiredField { fields } => format!(
                "Add the [{}] table(s) to the syllabus config",
                fields.join("], [")
            ),
            Self::InvalidWeekday { .. } => {
                "Use only M, T, W, R, F in schedule.weekdays (e.g. \"MWF\")".to_string()
            }
            Self::InvalidDate { .. } => {
                "Write schedule.year as YYYY and start/end/exclude dates as MM-DD".to_string()
            }
            Self::UnsupportedDesignation { .. } => {
                "Set course_designation to \"None\" or a supported code such as \"KLPC\"".to_string()
            }
            Self::TemplateNotFound { .. } => {
                "Only assignment, book and objective sections have entry templates".to_string()
            }
            Self::FetchFailure { .. } | Self::HttpError(_) => {
                "Check your network connection and the reference page URL".to_string()
            }
            Self::NoReferenceLinks { .. } => {
                "Pass --page-url pointing at a page that links .docx files".to_string()
            }
            Self::UrlError(_) => "Pass an absolute http(s) URL".to_string(),
            Self::InvalidSelection { count, .. } => {
                format!("Pick one of the {} listed files", count)
            }
            Self::Cancelled => "Run the command again to pick a file".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                "Make sure the file exists and is valid TOML format".to_string()
            }
            Self::IoError(_) => "Check that the file paths exist and are readable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Syllabus config is invalid: {}", self),
            ErrorCategory::Schedule => format!("Cannot build schedule: {}", self),
            ErrorCategory::Template => format!("Cannot render syllabus: {}", self),
            ErrorCategory::Network => format!("Cannot fetch reference document: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::User => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyllabusError>;
