use std::borrow::Cow;

/// Configuration errors raised while building a pipeline
///
/// These are reported synchronously by the constructor that received the bad
/// parameter and never during traversal. Errors produced while pulling elements
/// are the source's own error type and pass through the pipeline unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FluentError {
    /// A stage parameter is out of its accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),
}

impl FluentError {
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        FluentError::InvalidArgument(message.into())
    }
}
