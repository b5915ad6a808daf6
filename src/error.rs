use derive_more::From;
use std::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    /// Form input rejected before any collaborator is invoked.
    Validation(String),
    /// The content loader could not retrieve or parse the target.
    Load(String),
    /// The hosted model call failed.
    Inference(String),

    Custom(String),

    #[from]
    Io(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Load,
    Inference,
    Internal,
}

impl Error {
    pub fn validation(val: impl fmt::Display) -> Self {
        Self::Validation(val.to_string())
    }

    pub fn load(val: impl fmt::Display) -> Self {
        Self::Load(val.to_string())
    }

    pub fn inference(val: impl fmt::Display) -> Self {
        Self::Inference(val.to_string())
    }

    pub fn custom(val: impl fmt::Display) -> Self {
        Self::Custom(val.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Load(_) => ErrorKind::Load,
            Error::Inference(_) => ErrorKind::Inference,
            Error::Custom(_) | Error::Io(_) => ErrorKind::Internal,
        }
    }

    /// The bare message, without the kind prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Error::Validation(msg)
            | Error::Load(msg)
            | Error::Inference(msg)
            | Error::Custom(msg) => msg.clone(),
            Error::Io(e) => e.to_string(),
        }
    }
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        Error::Inference(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Load(err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Invalid input: {msg}"),
            Error::Load(msg) => write!(f, "Error loading content: {msg}"),
            Error::Inference(msg) => write!(f, "Error while summarizing: {msg}"),
            Error::Custom(msg) => write!(f, "{msg}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_errors_become_inference_errors() {
        let err: Error =
            async_openai::error::OpenAIError::InvalidArgument("bad model".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Inference);
        assert!(err.message().contains("bad model"));
    }

    #[test]
    fn display_prefixes_kind() {
        let err = Error::load("connection refused");
        assert_eq!(err.to_string(), "Error loading content: connection refused");
        assert_eq!(err.message(), "connection refused");
    }
}
