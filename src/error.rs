use thiserror::Error;

/// Unified error type for git-release operations.
///
/// Every variant is terminal: the workflow stops at the first error and the
/// binary exits non-zero after printing the message.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Sync with remote failed: {0}")]
    Sync(String),

    #[error("Branches have diverged: {0}")]
    Divergence(String),

    #[error("Stash restore failed: {0}")]
    StashConflict(String),

    #[error("Version format error: {0}")]
    VersionFormat(String),

    #[error("Tag collision: {0}")]
    TagCollision(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        ReleaseError::Environment(msg.into())
    }

    /// Create a sync error with context
    pub fn sync(msg: impl Into<String>) -> Self {
        ReleaseError::Sync(msg.into())
    }

    /// Create a divergence error with context
    pub fn divergence(msg: impl Into<String>) -> Self {
        ReleaseError::Divergence(msg.into())
    }

    /// Create a stash-conflict error with context
    pub fn stash_conflict(msg: impl Into<String>) -> Self {
        ReleaseError::StashConflict(msg.into())
    }

    /// Create a version-format error with context
    pub fn version_format(msg: impl Into<String>) -> Self {
        ReleaseError::VersionFormat(msg.into())
    }

    /// Create a tag-collision error with context
    pub fn tag_collision(msg: impl Into<String>) -> Self {
        ReleaseError::TagCollision(msg.into())
    }

    /// Create a push error with context
    pub fn push(msg: impl Into<String>) -> Self {
        ReleaseError::Push(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}
