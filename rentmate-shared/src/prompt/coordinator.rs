use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::decision::{Decision, consume_auth_trigger, decide, has_auth_trigger};
use super::error::PromptError;
use super::flags::{SessionFlag, SessionFlagStore};
use super::gate::CheckGate;
use super::hydration::Hydration;
use super::machine::{PromptEvent, PromptState};
use super::poller::{PollOutcome, PollStep, PollerHandle, TriggerPoller};
use crate::models::{Tag, UserRecord};
use crate::services::{TagService, UserProvider};

#[derive(Debug, Default)]
struct CoordinatorInner {
    state: PromptState,
    gate: CheckGate,
}

impl CoordinatorInner {
    // A different user than the one last checked starts from scratch.
    fn reset_if_new_user(&mut self, user_id: &str) {
        if self.gate.is_new_user(user_id) {
            debug!(user_id, "observed a different user, resetting tag prompt");
            self.state = self.state.transition(PromptEvent::UserChanged);
            self.gate = CheckGate::new();
        }
    }

    fn apply(&mut self, event: PromptEvent) -> PromptState {
        let next = self.state.transition(event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "tag prompt transition");
        }
        self.state = next;
        next
    }
}

/// Decides when to show the interest-tag prompt and carries out the
/// prompt's save and skip actions.
///
/// Cloning is cheap and clones share state, so one coordinator can be held by
/// several callbacks and by a running trigger poll. No internal borrow is held
/// across an `.await`.
#[derive(Clone)]
pub struct TagPromptCoordinator {
    inner: Rc<RefCell<CoordinatorInner>>,
    flags: Rc<dyn SessionFlagStore>,
    tags: Rc<dyn TagService>,
    users: Rc<dyn UserProvider>,
}

impl fmt::Debug for TagPromptCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagPromptCoordinator")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl TagPromptCoordinator {
    /// Builds a coordinator over the given collaborators with the prompt
    /// idle.
    pub fn new(
        flags: Rc<dyn SessionFlagStore>,
        tags: Rc<dyn TagService>,
        users: Rc<dyn UserProvider>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CoordinatorInner::default())),
            flags,
            tags,
            users,
        }
    }

    /// Whether both handles share the same prompt state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Current prompt state.
    pub fn state(&self) -> PromptState {
        self.inner.borrow().state
    }

    /// Whether the modal should be visible.
    pub fn is_prompt_open(&self) -> bool {
        self.state().is_open()
    }

    /// Whether a login or signup trigger is waiting to be consumed.
    pub fn has_pending_trigger(&self) -> bool {
        has_auth_trigger(self.flags.as_ref())
    }

    /// The trigger poll is only worth running while the prompt is closed and
    /// a trigger is pending.
    pub fn should_poll(&self) -> bool {
        !self.is_prompt_open() && self.has_pending_trigger()
    }

    /// Feeds the latest user record into the prompt. `None` means auth data
    /// is not ready yet and nothing happens. Each user is evaluated at most
    /// once per coordinator.
    pub fn observe_user(&self, user: Option<&UserRecord>) -> PromptState {
        let Some(user) = user else {
            return self.state();
        };

        let mut inner = self.inner.borrow_mut();
        inner.reset_if_new_user(&user.id);
        if !inner.gate.should_evaluate(&user.id) {
            return inner.state;
        }

        let previous = inner.state;
        inner.apply(PromptEvent::UserLoaded);
        let decision = decide(Some(user), self.flags.as_ref());
        let state = inner.apply(PromptEvent::Decided(decision));
        if decision == Decision::OpenForAuthTrigger && state.is_open() {
            consume_auth_trigger(self.flags.as_ref());
        }
        self.record_checked(&mut inner, &user.id);

        if state.opened_from(previous) {
            info!(user_id = %user.id, ?state, "opening tag prompt");
        }
        state
    }

    /// One tick of the trigger poll: opens the prompt once a trigger flag and
    /// user data are both present.
    pub fn check_trigger(&self) -> PollStep {
        if !self.should_poll() {
            return PollStep::Stop;
        }
        let Some(user) = self.users.current_user() else {
            return PollStep::Continue;
        };

        let mut inner = self.inner.borrow_mut();
        inner.reset_if_new_user(&user.id);
        if decide(Some(&user), self.flags.as_ref()) != Decision::OpenForAuthTrigger {
            return PollStep::Stop;
        }
        consume_auth_trigger(self.flags.as_ref());
        inner.apply(PromptEvent::TriggerFlagSeen);
        self.record_checked(&mut inner, &user.id);
        info!(user_id = %user.id, "opening tag prompt after sign-in");
        PollStep::Opened
    }

    /// Starts the trigger poll when one is needed. The future must be spawned
    /// by the caller; the handle cancels it when dropped.
    pub fn start_trigger_poll<S, F>(
        &self,
        poller: &TriggerPoller,
        hydration: &Hydration,
        sleep: S,
    ) -> Option<(PollerHandle, impl Future<Output = PollOutcome> + 'static)>
    where
        S: FnMut(Duration) -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        if !self.should_poll() {
            return None;
        }
        let coordinator = self.clone();
        Some(poller.start(hydration, move || coordinator.check_trigger(), sleep))
    }

    /// Opens the prompt regardless of flags, e.g. from an "edit interests"
    /// button.
    pub fn manually_open(&self) {
        self.inner.borrow_mut().apply(PromptEvent::ManualOpen);
    }

    /// Closes the prompt and suppresses the missing-tags prompt for the rest
    /// of the session.
    pub fn skip(&self) {
        self.flags.raise(SessionFlag::SkippedTagPrompt);
        self.inner.borrow_mut().apply(PromptEvent::UserSkipped);
        info!("tag prompt skipped");
    }

    /// Whether `user` would be prompted right now. Does not touch any state.
    pub fn should_show_for_user(&self, user: &UserRecord) -> bool {
        decide(Some(user), self.flags.as_ref()).opens()
    }

    /// Called by the login flow before it navigates away.
    pub fn trigger_for_login(&self) {
        self.flags.raise(SessionFlag::TriggerAfterLogin);
    }

    /// Called by the signup flow before it navigates away.
    pub fn trigger_for_signup(&self) {
        self.flags.raise(SessionFlag::TriggerAfterSignup);
    }

    /// Every tag the prompt offers.
    pub async fn available_tags(&self) -> Result<Vec<Tag>, PromptError> {
        self.tags.get_all_tags().await.map_err(PromptError::Load)
    }

    /// Tags attached to the current user, fresh from the tag service.
    pub async fn user_tags(&self) -> Result<Vec<Tag>, PromptError> {
        let user = self.users.current_user().ok_or(PromptError::NoUser)?;
        self.tags
            .get_user_tags(&user.id)
            .await
            .map_err(PromptError::Load)
    }

    /// Persists `tag_ids` as the user's tags, refreshes the user and closes
    /// the prompt.
    ///
    /// On failure the prompt stays open and the error is returned for
    /// display. A failed refresh after a successful save is logged and
    /// reported as `Ok(None)`.
    pub async fn save(&self, tag_ids: &[String]) -> Result<Option<UserRecord>, PromptError> {
        let user = self.users.current_user().ok_or(PromptError::NoUser)?;
        self.tags
            .update_user_tags(&user.id, tag_ids)
            .await
            .map_err(PromptError::Save)?;

        let refreshed = self.refresh_user().await;
        self.flags.clear(SessionFlag::SkippedTagPrompt);
        self.inner.borrow_mut().apply(PromptEvent::UserSaved);
        info!(user_id = %user.id, count = tag_ids.len(), "saved interest tags");
        Ok(refreshed)
    }

    /// Detaches one tag from the current user and refreshes the user.
    pub async fn remove_tag(&self, tag_id: &str) -> Result<Option<UserRecord>, PromptError> {
        let user = self.users.current_user().ok_or(PromptError::NoUser)?;
        self.tags
            .remove_user_tag(&user.id, tag_id)
            .await
            .map_err(PromptError::Remove)?;
        Ok(self.refresh_user().await)
    }

    async fn refresh_user(&self) -> Option<UserRecord> {
        match self.users.refresh().await {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "failed to refresh user after tag change");
                None
            }
        }
    }

    fn record_checked(&self, inner: &mut CoordinatorInner, user_id: &str) {
        inner.gate.record(user_id);
        self.flags.set(SessionFlag::LastCheckedUserId.key(), user_id);
    }
}
