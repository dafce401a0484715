use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message to show an interactive user when the error was caused by
    /// their input and the loop can carry on
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Validation(msg) | Error::NotFound(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::Validation("bad input".to_string()).user_message(),
            Some("bad input")
        );
        assert_eq!(
            Error::NotFound("missing".to_string()).user_message(),
            Some("missing")
        );
        assert_eq!(Error::Config("broken".to_string()).user_message(), None);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::NotFound("Student 'Ada'".to_string()).to_string(),
            "Not found: Student 'Ada'"
        );
    }
}
