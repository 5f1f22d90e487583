use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalonError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("Wrong username or password")]
    AuthenticationFailure,

    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("Invalid appointment index '{input}': {reason}")]
    InvalidIndex { input: String, reason: String },

    #[error("Insufficient loyalty points: {points} of {threshold} required")]
    InsufficientPoints { points: u32, threshold: u32 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("User store format error at line {line}: {message}")]
    StoreFormatError { line: usize, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SalonError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Account,
    Appointment,
    Loyalty,
    Validation,
    Config,
    Store,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SalonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SalonError::DuplicateUsername { .. }
            | SalonError::AuthenticationFailure
            | SalonError::NotAuthenticated => ErrorCategory::Account,
            SalonError::InvalidIndex { .. } => ErrorCategory::Appointment,
            SalonError::InsufficientPoints { .. } => ErrorCategory::Loyalty,
            SalonError::ValidationError { .. } => ErrorCategory::Validation,
            SalonError::ConfigError { .. }
            | SalonError::ConfigValidationError { .. }
            | SalonError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            SalonError::StoreFormatError { .. } => ErrorCategory::Store,
            SalonError::IoError(_) | SalonError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Account
            | ErrorCategory::Appointment
            | ErrorCategory::Loyalty
            | ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Store => ErrorSeverity::Medium,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SalonError::DuplicateUsername { .. } => {
                "Username already exists. Please choose a different one.".to_string()
            }
            SalonError::AuthenticationFailure => {
                "Login failed. Please check your username and password.".to_string()
            }
            SalonError::NotAuthenticated => "Please log in first.".to_string(),
            SalonError::InvalidIndex { input, .. } => {
                format!("'{}' is not a valid appointment index.", input)
            }
            SalonError::InsufficientPoints { .. } => {
                "Insufficient loyalty points to redeem.".to_string()
            }
            SalonError::ValidationError { message } => message.clone(),
            SalonError::StoreFormatError { line, .. } => {
                format!("The user store file is damaged at line {}.", line)
            }
            SalonError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            SalonError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            SalonError::InvalidConfigValueError { field, value, .. } => {
                format!("Configuration value '{}' is not valid for '{}'.", value, field)
            }
            SalonError::IoError(e) => format!("File operation failed: {}", e),
            SalonError::CsvError(e) => {
                format!("Could not read or write the user store: {}", e)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SalonError::DuplicateUsername { .. } => {
                "Pick another username and register again".to_string()
            }
            SalonError::AuthenticationFailure => {
                "Check the spelling of your username and password".to_string()
            }
            SalonError::NotAuthenticated => {
                "Choose Login from the menu before this action".to_string()
            }
            SalonError::InvalidIndex { .. } => {
                "Display the appointments to see the valid indices".to_string()
            }
            SalonError::InsufficientPoints { threshold, .. } => {
                format!("Collect at least {} points before redeeming", threshold)
            }
            SalonError::ValidationError { .. } => "Re-enter the value".to_string(),
            SalonError::StoreFormatError { .. } => {
                "Fix or remove the damaged line in the user store file".to_string()
            }
            SalonError::ConfigError { .. }
            | SalonError::ConfigValidationError { .. }
            | SalonError::InvalidConfigValueError { .. } => {
                "Check the configuration file and the command line flags".to_string()
            }
            SalonError::IoError(_) | SalonError::CsvError(_) => {
                "Check file permissions and that the target directory exists".to_string()
            }
        }
    }
}
