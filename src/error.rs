use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Invalid input for '{0}'. Please enter valid numbers.")]
    InvalidAmount(String),

    #[error("Invalid date format: '{0}'. Please use the format 'dd/mm/yyyy' (e.g., 01/01/2024).")]
    InvalidDateFormat(String),

    #[error("No data available for the specified period.")]
    NoData,

    #[error("Entries file error: {0}")]
    EntryFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// `NoData` is surfaced as a warning rather than a failure: the user is
    /// informed and nothing is written, but the exit status stays zero.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::NoData)
    }

    /// Message suitable for showing to the user at the CLI boundary.
    /// Infrastructure failures are logged in full and reported generically.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {:?}", e);
                "Database connection error".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                format!("IO error: {}", e)
            }
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
