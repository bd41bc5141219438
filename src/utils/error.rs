use thiserror::Error;

#[derive(Error, Debug)]
pub enum SumLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required value: {field}")]
    MissingConfigError { field: String },

    #[error("No workbook selected")]
    NoWorkbookSelected,

    #[error("Sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("Column '{column}' not found in sheet")]
    MissingColumn { column: String },

    #[error("Column '{column}' contains ',' as decimal separator, replace it with '.'")]
    CommaDecimal { column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Workbook,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SumLoadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SumLoadError::IoError(_) | SumLoadError::SerializationError(_) => ErrorCategory::Io,
            SumLoadError::ConfigValidationError { .. }
            | SumLoadError::InvalidConfigValueError { .. }
            | SumLoadError::MissingConfigError { .. }
            | SumLoadError::NoWorkbookSelected => ErrorCategory::Configuration,
            SumLoadError::WorkbookError(_) | SumLoadError::SheetNotFound { .. } => {
                ErrorCategory::Workbook
            }
            SumLoadError::MissingColumn { .. }
            | SumLoadError::CommaDecimal { .. }
            | SumLoadError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Workbook => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SumLoadError::IoError(_) => "Check that the file exists and is readable".to_string(),
            SumLoadError::SerializationError(_) => {
                "Delete the settings file, it will be recreated on the next sum".to_string()
            }
            SumLoadError::WorkbookError(_) => {
                "Make sure the file is a valid .xlsx or .xls workbook".to_string()
            }
            SumLoadError::ConfigValidationError { field, .. }
            | SumLoadError::InvalidConfigValueError { field, .. }
            | SumLoadError::MissingConfigError { field } => {
                format!("Fix the value of '{}'", field)
            }
            SumLoadError::NoWorkbookSelected => {
                "Pass --file <PATH> to choose an Excel workbook".to_string()
            }
            SumLoadError::SheetNotFound { .. } => {
                "Run `sumload sheets` to list the available sheets".to_string()
            }
            SumLoadError::MissingColumn { .. } => {
                "Wrong sheet selected, pick the sheet that holds the load table".to_string()
            }
            SumLoadError::CommaDecimal { column } => {
                format!("Replace ',' with '.' in column '{}' of the workbook", column)
            }
            SumLoadError::ProcessingError { .. } => "Check the workbook contents".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SumLoadError::MissingColumn { .. } => {
                format!("Wrong sheet selected! ({})", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SumLoadError>;
