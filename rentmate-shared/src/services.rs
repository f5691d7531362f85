//! Collaborators the tag prompt depends on.
//!
//! Both traits are `?Send`: the frontend runs on the single-threaded browser
//! event loop and its implementations hold `Rc`s and browser handles.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ErrorResponse, Tag, UserRecord};

/// Failure reported by a remote collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {error}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Body the server sent, or its canonical reason.
        error: ErrorResponse,
    },
    /// The response body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the server answered 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Interest tag persistence. No retries are built in.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait TagService {
    /// Every tag a user can choose from.
    async fn get_all_tags(&self) -> Result<Vec<Tag>, ServiceError>;

    /// Tags currently attached to `user_id`.
    async fn get_user_tags(&self, user_id: &str) -> Result<Vec<Tag>, ServiceError>;

    /// Replaces the user's tags with `tag_ids`.
    async fn update_user_tags(&self, user_id: &str, tag_ids: &[String])
    -> Result<(), ServiceError>;

    /// Detaches a single tag from the user.
    async fn remove_user_tag(&self, user_id: &str, tag_id: &str) -> Result<(), ServiceError>;
}

/// Source of the signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait UserProvider {
    /// The user as currently known, `None` while auth state is still loading
    /// or nobody is signed in.
    fn current_user(&self) -> Option<UserRecord>;

    /// Reloads the user from the server and publishes the new record.
    async fn refresh(&self) -> Result<UserRecord, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_status() {
        let rejected = ServiceError::Rejected {
            status: 401,
            error: ErrorResponse::new("Unauthorized"),
        };
        assert_eq!(rejected.status(), Some(401));
        assert!(rejected.is_unauthorized());
        assert_eq!(
            rejected.to_string(),
            "request rejected (401): Unauthorized"
        );

        let transport = ServiceError::Transport("offline".to_string());
        assert_eq!(transport.status(), None);
        assert!(!transport.is_unauthorized());
    }
}
