//! Value model error types

use crate::{ErrorCode, HIM0401, HIM0402};
use thiserror::Error;

/// Main value model error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A primitive literal did not match its grammar
    #[error("{code}: invalid {grammar} literal '{literal}'")]
    Parse {
        code: ErrorCode,
        /// Name of the grammar the literal was checked against
        grammar: &'static str,
        /// The rejected input, verbatim
        literal: String,
    },

    /// Type model error (unknown names, unresolved or cyclic base chains)
    #[error("{code}: {message}")]
    TypeModel {
        code: ErrorCode,
        message: String,
        type_name: Option<String>,
    },

    /// A value could not be represented
    #[error("{code}: {message}")]
    Construction { code: ErrorCode, message: String },

    /// System error (I/O, configuration)
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },
}

impl ModelError {
    /// Create a literal parse error
    pub fn parse(code: ErrorCode, grammar: &'static str, literal: impl Into<String>) -> Self {
        Self::Parse {
            code,
            grammar,
            literal: literal.into(),
        }
    }

    /// Create a type model error
    pub fn type_model(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::TypeModel {
            code,
            message: message.into(),
            type_name: None,
        }
    }

    /// Create a type model error naming the offending type
    pub fn type_model_for(
        code: ErrorCode,
        message: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::TypeModel {
            code,
            message: message.into(),
            type_name: Some(type_name.into()),
        }
    }

    /// Create a construction error
    pub fn construction(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Construction {
            code,
            message: message.into(),
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::System {
            code: HIM0401,
            message: err.to_string(),
            context: Some(path.as_ref().display().to_string()),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::system(HIM0402, message)
    }

    /// Attach context to a system error; other variants are returned unchanged
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        if let Self::System { context, .. } = &mut self {
            *context = Some(ctx.into());
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::TypeModel { code, .. } => *code,
            Self::Construction { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Get the rejected literal of a parse error
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Parse { literal, .. } => Some(literal),
            _ => None,
        }
    }

    /// Get the context or offending type name, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::TypeModel { type_name, .. } => type_name.as_deref(),
            Self::System { context, .. } => context.as_deref(),
            _ => None,
        }
    }
}
