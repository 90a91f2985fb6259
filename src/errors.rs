use thiserror::Error;

/// Errors that can occur while building or resolving a code model.
#[derive(Error, Debug)]
pub enum DocGraftError {
    #[error("alias resolution error: cannot resolve '{name}' (in {scope})")]
    AliasResolution { name: String, scope: String },

    #[error("duplicate member '{name}' in '{parent}'")]
    DuplicateMember { name: String, parent: String },

    #[error("object '{name}' is not a class")]
    NotAClass { name: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `DocGraftError`.
pub type Result<T> = std::result::Result<T, DocGraftError>;
