/// Convenience result type used across squoosh-gltf.
pub type SquooshResult<T> = Result<T, SquooshError>;

/// Top-level error taxonomy used by the compression transforms.
#[derive(thiserror::Error, Debug)]
pub enum SquooshError {
    /// The external encoder executable could not be found.
    #[error("Command \"{tool}\" not found. Please install {install_hint}.")]
    ToolNotFound {
        /// Executable that was looked up.
        tool: String,
        /// Where the executable can be installed from.
        install_hint: String,
    },

    /// The external encoder failed to launch, exited non-zero, or produced no output.
    #[error("compression error: {0}")]
    Compression(String),

    /// Invalid user-provided options or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SquooshError {
    /// Build a [`SquooshError::ToolNotFound`] value.
    pub fn tool_not_found(tool: impl Into<String>, install_hint: impl Into<String>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            install_hint: install_hint.into(),
        }
    }

    /// Build a [`SquooshError::Compression`] value.
    pub fn compression(msg: impl Into<String>) -> Self {
        Self::Compression(msg.into())
    }

    /// Build a [`SquooshError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SquooshError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
