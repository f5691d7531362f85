use super::decision::Decision;

/// Why the prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReason {
    /// A login or signup just completed.
    AuthTrigger,
    /// The user has no interest tags yet.
    MissingTags,
    /// Opened from an "edit interests" control.
    Manual,
}

/// Why the prompt is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Evaluation found nothing to ask.
    NotNeeded,
    /// The user dismissed the prompt.
    Skipped,
    /// The user saved a tag selection.
    Saved,
}

/// Lifecycle of the prompt for one mount of the hosting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    /// No user has been evaluated yet.
    #[default]
    Idle,
    /// A user arrived and the evaluator is running.
    Evaluating,
    /// The modal is visible.
    PromptOpen(OpenReason),
    /// The modal is hidden until the next user or trigger.
    Closed(CloseReason),
}

/// Discrete inputs to the prompt state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// User data became available for a user not yet checked.
    UserLoaded,
    /// The evaluator finished.
    Decided(Decision),
    /// The trigger poller saw a login/signup flag with user data present.
    TriggerFlagSeen,
    /// The user asked to edit their interests.
    ManualOpen,
    /// The user dismissed the modal.
    UserSkipped,
    /// The selected tags were persisted.
    UserSaved,
    /// A different user was observed; everything starts over.
    UserChanged,
}

impl PromptState {
    /// Whether the modal should be visible.
    pub fn is_open(self) -> bool {
        matches!(self, Self::PromptOpen(_))
    }

    /// Whether reaching `self` from `previous` shows the modal, as opposed to
    /// it already being visible.
    pub fn opened_from(self, previous: Self) -> bool {
        self.is_open() && !previous.is_open()
    }

    /// Applies `event`; events that do not apply in the current state leave
    /// it unchanged.
    #[must_use]
    pub fn transition(self, event: PromptEvent) -> Self {
        match (self, event) {
            (_, PromptEvent::UserChanged) => Self::Idle,
            (_, PromptEvent::ManualOpen) => Self::PromptOpen(OpenReason::Manual),
            (Self::PromptOpen(_), PromptEvent::UserSkipped) => Self::Closed(CloseReason::Skipped),
            (Self::PromptOpen(_), PromptEvent::UserSaved) => Self::Closed(CloseReason::Saved),
            (Self::PromptOpen(_), _) => self,
            (Self::Idle | Self::Closed(_), PromptEvent::UserLoaded) => Self::Evaluating,
            (Self::Evaluating, PromptEvent::Decided(decision)) => match decision {
                Decision::OpenForAuthTrigger => Self::PromptOpen(OpenReason::AuthTrigger),
                Decision::OpenForMissingTags => Self::PromptOpen(OpenReason::MissingTags),
                Decision::KeepClosed => Self::Closed(CloseReason::NotNeeded),
            },
            (_, PromptEvent::TriggerFlagSeen) => Self::PromptOpen(OpenReason::AuthTrigger),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_path() {
        let state = PromptState::Idle.transition(PromptEvent::UserLoaded);
        assert_eq!(state, PromptState::Evaluating);
        assert_eq!(
            state.transition(PromptEvent::Decided(Decision::OpenForMissingTags)),
            PromptState::PromptOpen(OpenReason::MissingTags)
        );
        assert_eq!(
            state.transition(PromptEvent::Decided(Decision::OpenForAuthTrigger)),
            PromptState::PromptOpen(OpenReason::AuthTrigger)
        );
        assert_eq!(
            state.transition(PromptEvent::Decided(Decision::KeepClosed)),
            PromptState::Closed(CloseReason::NotNeeded)
        );
    }

    #[test]
    fn test_decision_outside_evaluation_is_ignored() {
        assert_eq!(
            PromptState::Idle.transition(PromptEvent::Decided(Decision::OpenForMissingTags)),
            PromptState::Idle
        );
    }

    #[test]
    fn test_open_prompt_closes_on_skip_or_save() {
        let open = PromptState::PromptOpen(OpenReason::MissingTags);
        assert!(open.is_open());
        assert_eq!(
            open.transition(PromptEvent::UserSkipped),
            PromptState::Closed(CloseReason::Skipped)
        );
        assert_eq!(
            open.transition(PromptEvent::UserSaved),
            PromptState::Closed(CloseReason::Saved)
        );
    }

    #[test]
    fn test_open_prompt_ignores_reevaluation() {
        let open = PromptState::PromptOpen(OpenReason::AuthTrigger);
        assert_eq!(open.transition(PromptEvent::UserLoaded), open);
        assert_eq!(open.transition(PromptEvent::TriggerFlagSeen), open);
    }

    #[test]
    fn test_opened_from_only_counts_new_openings() {
        let manual = PromptState::PromptOpen(OpenReason::Manual);
        let missing = PromptState::PromptOpen(OpenReason::MissingTags);
        assert!(missing.opened_from(PromptState::Evaluating));
        assert!(manual.opened_from(PromptState::Closed(CloseReason::Skipped)));
        assert!(!missing.opened_from(manual));
        assert!(!PromptState::Closed(CloseReason::Saved).opened_from(missing));
    }

    #[test]
    fn test_skip_when_closed_is_noop() {
        let closed = PromptState::Closed(CloseReason::NotNeeded);
        assert_eq!(closed.transition(PromptEvent::UserSkipped), closed);
        assert_eq!(closed.transition(PromptEvent::UserSaved), closed);
    }

    #[test]
    fn test_trigger_and_manual_open_from_closed() {
        let closed = PromptState::Closed(CloseReason::Skipped);
        assert_eq!(
            closed.transition(PromptEvent::TriggerFlagSeen),
            PromptState::PromptOpen(OpenReason::AuthTrigger)
        );
        assert_eq!(
            closed.transition(PromptEvent::ManualOpen),
            PromptState::PromptOpen(OpenReason::Manual)
        );
    }

    #[test]
    fn test_user_changed_resets() {
        let open = PromptState::PromptOpen(OpenReason::Manual);
        assert_eq!(open.transition(PromptEvent::UserChanged), PromptState::Idle);
    }
}
