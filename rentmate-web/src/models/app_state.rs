use async_trait::async_trait;
use shared::models::UserRecord;
use shared::services::{ServiceError, UserProvider};
use yewdux::{Dispatch, Store};

use crate::api::RentalsClient;

#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    /// Signed-in user, `None` while loading or when signed out.
    pub user: Option<UserRecord>,
    /// Set once the initial profile request has finished either way.
    pub auth_checked: bool,
}

impl AppState {
    pub fn signed_in(user: UserRecord) -> Self {
        Self {
            user: Some(user),
            auth_checked: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            auth_checked: true,
        }
    }
}

/// [`UserProvider`] reading the user from the app store and writing refreshed
/// records back into it.
pub struct StoreUserProvider {
    dispatch: Dispatch<AppState>,
    client: RentalsClient,
}

impl StoreUserProvider {
    pub fn new(dispatch: Dispatch<AppState>, client: RentalsClient) -> Self {
        Self { dispatch, client }
    }
}

#[async_trait(?Send)]
impl UserProvider for StoreUserProvider {
    fn current_user(&self) -> Option<UserRecord> {
        self.dispatch.get().user.clone()
    }

    async fn refresh(&self) -> Result<UserRecord, ServiceError> {
        let user = self.client.get_profile().await?;
        self.dispatch.set(AppState::signed_in(user.clone()));
        Ok(user)
    }
}
