use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Workbook write failed: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Page {page}: result container has no <{element}> element")]
    MissingElementError { page: u32, element: String },

    #[error("Page {page}: <{element}> element has no '{attribute}' attribute")]
    MissingAttributeError {
        page: u32,
        element: String,
        attribute: String,
    },

    #[error("Invalid CSS selector '{selector}'")]
    SelectorError { selector: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Export error: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Extraction,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::ApiError(_) | ScrapeError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ScrapeError::MissingElementError { .. }
            | ScrapeError::MissingAttributeError { .. }
            | ScrapeError::SelectorError { .. } => ErrorCategory::Extraction,
            ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScrapeError::XlsxError(_)
            | ScrapeError::CsvError(_)
            | ScrapeError::IoError(_)
            | ScrapeError::SerializationError(_)
            | ScrapeError::ExportError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Extraction => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and that the archive site is reachable",
            ErrorCategory::Extraction => {
                "The result page markup may have changed; review the selector settings"
            }
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Output => {
                "Check that the output directory is writable and the file is not open elsewhere"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch data: {}", self),
            ErrorCategory::Extraction => format!("Could not read search results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
