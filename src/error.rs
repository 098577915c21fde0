use thiserror::Error;

/// Errors that can occur while searching, fetching or persisting recipes
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to reach the recipe API
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe API answered with a non-success status
    #[error("{message}")]
    ApiError { status: u16, message: String },

    /// No credential is active, so no request can be issued
    #[error("Please enter an API key to search recipes.")]
    MissingCredential,

    /// A JSON payload (API response or stored value) could not be decoded
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Reading or writing the local store failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// A stored value does not have the expected shape
    #[error("Corrupt stored value under '{key}': {reason}")]
    CorruptValue { key: String, reason: String },

    /// A custom recipe field could not be parsed
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// Unknown diet filter name
    #[error("Unknown diet: {0}")]
    UnknownDiet(String),

    /// No recipe with this id is known locally
    #[error("Recipe {0} not found")]
    RecipeNotFound(i64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text safe to show the user: the API's own message, or `fallback`
    /// for transport and decoding failures.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::ApiError { message, .. } => message.clone(),
            AppError::MissingCredential => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = AppError::ApiError {
            status: 401,
            message: "You are not authorized.".to_string(),
        };
        assert_eq!(err.to_string(), "You are not authorized.");
    }

    #[test]
    fn test_user_message_hides_transport_details() {
        let api = AppError::ApiError {
            status: 402,
            message: "Daily limit reached".to_string(),
        };
        assert_eq!(api.user_message("generic"), "Daily limit reached");

        let json = AppError::JsonError(serde_json::from_str::<u32>("x").unwrap_err());
        assert_eq!(json.user_message("generic"), "generic");
        assert_eq!(
            AppError::MissingCredential.user_message("generic"),
            "Please enter an API key to search recipes."
        );
    }

    #[test]
    fn test_invalid_field_display() {
        let err = AppError::InvalidField {
            field: "servings",
            value: "four".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for servings: \"four\"");
    }
}
