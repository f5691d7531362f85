use thiserror::Error;

use crate::services::ServiceError;

/// Errors surfaced by prompt operations. Every variant leaves the prompt
/// state as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// No signed-in user to attach tags to.
    #[error("no signed-in user")]
    NoUser,
    /// The available tags could not be fetched.
    #[error("failed to load tags: {0}")]
    Load(#[source] ServiceError),
    /// The tag service rejected or failed the update.
    #[error("failed to save tags: {0}")]
    Save(#[source] ServiceError),
    /// The tag service failed to detach a tag.
    #[error("failed to remove tag: {0}")]
    Remove(#[source] ServiceError),
}
