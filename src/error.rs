use crate::range::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("TypeError: {message}")]
    TypeError { message: String, range: Option<Range> },

    #[error("RangeError: {message}")]
    RangeError { message: String, range: Option<Range> },

    #[error("SyntaxError: {message}")]
    SyntaxError { message: String, range: Option<Range> },

    #[error("InternalError: {message}")]
    InternalError { message: String, range: Option<Range> },
}

impl ScriptError {
    pub fn type_error(message: impl Into<String>, range: Option<Range>) -> Self {
        ScriptError::TypeError {
            message: message.into(),
            range,
        }
    }

    pub fn range_error(message: impl Into<String>, range: Option<Range>) -> Self {
        ScriptError::RangeError {
            message: message.into(),
            range,
        }
    }

    pub fn syntax_error(message: impl Into<String>, range: Option<Range>) -> Self {
        ScriptError::SyntaxError {
            message: message.into(),
            range,
        }
    }

    pub fn internal_error(message: impl Into<String>, range: Option<Range>) -> Self {
        ScriptError::InternalError {
            message: message.into(),
            range,
        }
    }

    pub fn not_constructor(range: Option<Range>) -> Self {
        ScriptError::type_error("This is not a constructor", range)
    }

    pub fn invalid_index(index: &str, range: Option<Range>) -> Self {
        ScriptError::range_error(format!("\"{index}\" is an invalid index"), range)
    }

    pub fn message(&self) -> &str {
        match self {
            ScriptError::TypeError { message, .. }
            | ScriptError::RangeError { message, .. }
            | ScriptError::SyntaxError { message, .. }
            | ScriptError::InternalError { message, .. } => message,
        }
    }

    /// Source position the error was raised at, if the caller supplied one.
    pub fn range(&self) -> Option<Range> {
        match self {
            ScriptError::TypeError { range, .. }
            | ScriptError::RangeError { range, .. }
            | ScriptError::SyntaxError { range, .. }
            | ScriptError::InternalError { range, .. } => *range,
        }
    }
}
