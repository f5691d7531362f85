//! In-memory collaborators for the tag prompt scenarios.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use shared::models::{ErrorResponse, Tag, UserRecord};
use shared::services::{ServiceError, TagService, UserProvider};

pub fn catalog() -> Vec<Tag> {
    vec![
        Tag::new("1", "Pet friendly"),
        Tag::new("2", "Near transit"),
        Tag::new("3", "Beach"),
        Tag::new("4", "Quiet"),
    ]
}

/// Tag service backed by a map of user id to tag ids.
#[derive(Debug, Default)]
pub struct FakeTagService {
    assigned: RefCell<HashMap<String, Vec<String>>>,
    fail_updates: Cell<bool>,
    update_calls: Cell<u32>,
}

impl FakeTagService {
    pub fn failing_updates(&self, fail: bool) {
        self.fail_updates.set(fail);
    }

    pub fn update_calls(&self) -> u32 {
        self.update_calls.get()
    }

    pub fn tags_of(&self, user_id: &str) -> Vec<Tag> {
        let ids = self
            .assigned
            .borrow()
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        catalog()
            .into_iter()
            .filter(|tag| ids.contains(&tag.id))
            .collect()
    }
}

#[async_trait(?Send)]
impl TagService for FakeTagService {
    async fn get_all_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(catalog())
    }

    async fn get_user_tags(&self, user_id: &str) -> Result<Vec<Tag>, ServiceError> {
        Ok(self.tags_of(user_id))
    }

    async fn update_user_tags(
        &self,
        user_id: &str,
        tag_ids: &[String],
    ) -> Result<(), ServiceError> {
        self.update_calls.set(self.update_calls.get() + 1);
        if self.fail_updates.get() {
            return Err(ServiceError::Rejected {
                status: 503,
                error: ErrorResponse::new("tag service unavailable"),
            });
        }
        self.assigned
            .borrow_mut()
            .insert(user_id.to_string(), tag_ids.to_vec());
        Ok(())
    }

    async fn remove_user_tag(&self, user_id: &str, tag_id: &str) -> Result<(), ServiceError> {
        if let Some(ids) = self.assigned.borrow_mut().get_mut(user_id) {
            ids.retain(|id| id != tag_id);
        }
        Ok(())
    }
}

/// Auth state whose user can be filled in late, like a store hydrating
/// after navigation.
#[derive(Debug)]
pub struct FakeUsers {
    current: RefCell<Option<UserRecord>>,
    tags: Rc<FakeTagService>,
}

impl FakeUsers {
    pub fn new(tags: Rc<FakeTagService>) -> Self {
        Self {
            current: RefCell::new(None),
            tags,
        }
    }

    pub fn sign_in(&self, user: UserRecord) {
        *self.current.borrow_mut() = Some(user);
    }
}

#[async_trait(?Send)]
impl UserProvider for FakeUsers {
    fn current_user(&self) -> Option<UserRecord> {
        self.current.borrow().clone()
    }

    async fn refresh(&self) -> Result<UserRecord, ServiceError> {
        let mut current = self.current.borrow_mut();
        let user = current
            .as_mut()
            .ok_or_else(|| ServiceError::Transport("not signed in".to_string()))?;
        user.tags = self.tags.tags_of(&user.id);
        Ok(user.clone())
    }
}
