use tracing::debug;

use super::flags::{SessionFlag, SessionFlagStore};
use crate::models::UserRecord;

/// Outcome of evaluating whether the tag prompt should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// A login or signup just happened; open regardless of earlier skips.
    OpenForAuthTrigger,
    /// The user has no tags and has not dismissed the prompt this session.
    OpenForMissingTags,
    /// Nothing to ask, or no user yet.
    KeepClosed,
}

impl Decision {
    /// Whether the decision shows the prompt.
    pub fn opens(self) -> bool {
        !matches!(self, Self::KeepClosed)
    }
}

/// Whether a login or signup trigger flag is raised.
pub fn has_auth_trigger(flags: &dyn SessionFlagStore) -> bool {
    SessionFlag::AUTH_TRIGGERS
        .into_iter()
        .any(|flag| flags.is_raised(flag))
}

/// Evaluates the prompt rules in priority order. Never writes to `flags`;
/// acting on [`Decision::OpenForAuthTrigger`] is the caller's job, see
/// [`consume_auth_trigger`].
pub fn decide(user: Option<&UserRecord>, flags: &dyn SessionFlagStore) -> Decision {
    let Some(user) = user else {
        return Decision::KeepClosed;
    };

    let decision = if has_auth_trigger(flags) {
        Decision::OpenForAuthTrigger
    } else if flags.is_raised(SessionFlag::SkippedTagPrompt) || user.has_tags() {
        Decision::KeepClosed
    } else {
        Decision::OpenForMissingTags
    };
    debug!(user_id = %user.id, ?decision, "evaluated tag prompt");
    decision
}

/// Clears both trigger flags and the skip flag. A fresh login or signup
/// always overrides an earlier skip.
pub fn consume_auth_trigger(flags: &dyn SessionFlagStore) {
    for flag in SessionFlag::AUTH_TRIGGERS {
        flags.clear(flag);
    }
    flags.clear(SessionFlag::SkippedTagPrompt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use crate::prompt::MemoryFlagStore;
    use test_case::test_case;

    fn store_with(raised: &[SessionFlag]) -> MemoryFlagStore {
        let store = MemoryFlagStore::new();
        for flag in raised {
            store.raise(*flag);
        }
        store
    }

    fn user(tag_count: usize) -> UserRecord {
        let tags = (0..tag_count)
            .map(|i| Tag::new(i.to_string(), format!("tag-{i}")))
            .collect();
        UserRecord::new("u1").with_tags(tags)
    }

    #[test_case(0, &[] => Decision::OpenForMissingTags ; "no tags and no flags")]
    #[test_case(2, &[] => Decision::KeepClosed ; "user already has tags")]
    #[test_case(0, &[SessionFlag::SkippedTagPrompt] => Decision::KeepClosed ; "skipped this session")]
    #[test_case(3, &[SessionFlag::SkippedTagPrompt] => Decision::KeepClosed ; "skipped with tags")]
    #[test_case(0, &[SessionFlag::TriggerAfterLogin] => Decision::OpenForAuthTrigger ; "login trigger")]
    #[test_case(4, &[SessionFlag::TriggerAfterSignup] => Decision::OpenForAuthTrigger ; "signup trigger with tags")]
    #[test_case(0, &[SessionFlag::TriggerAfterLogin, SessionFlag::SkippedTagPrompt] => Decision::OpenForAuthTrigger ; "trigger beats skip")]
    #[test_case(1, &[SessionFlag::TriggerAfterLogin, SessionFlag::TriggerAfterSignup] => Decision::OpenForAuthTrigger ; "both triggers")]
    fn test_decide(tag_count: usize, raised: &[SessionFlag]) -> Decision {
        decide(Some(&user(tag_count)), &store_with(raised))
    }

    #[test]
    fn test_missing_user_keeps_closed_without_touching_flags() {
        let store = store_with(&[
            SessionFlag::TriggerAfterLogin,
            SessionFlag::SkippedTagPrompt,
        ]);
        let before = store.snapshot();
        assert_eq!(decide(None, &store), Decision::KeepClosed);
        assert_eq!(decide(None, &store), Decision::KeepClosed);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_decide_does_not_consume_trigger() {
        let store = store_with(&[SessionFlag::TriggerAfterLogin]);
        assert_eq!(decide(Some(&user(0)), &store), Decision::OpenForAuthTrigger);
        assert!(store.is_raised(SessionFlag::TriggerAfterLogin));
    }

    #[test]
    fn test_trigger_value_must_be_true() {
        let store = MemoryFlagStore::new();
        store.set(SessionFlag::TriggerAfterLogin.key(), "false");
        assert!(!has_auth_trigger(&store));
        assert_eq!(decide(Some(&user(1)), &store), Decision::KeepClosed);
    }

    #[test]
    fn test_consume_auth_trigger_clears_skip_and_triggers() {
        let store = store_with(&[
            SessionFlag::TriggerAfterLogin,
            SessionFlag::TriggerAfterSignup,
            SessionFlag::SkippedTagPrompt,
        ]);
        store.set(SessionFlag::LastCheckedUserId.key(), "u1");

        consume_auth_trigger(&store);

        assert!(!has_auth_trigger(&store));
        assert!(!store.is_raised(SessionFlag::SkippedTagPrompt));
        assert_eq!(
            store.get(SessionFlag::LastCheckedUserId.key()).as_deref(),
            Some("u1")
        );
    }

    #[test]
    fn test_opens() {
        assert!(Decision::OpenForAuthTrigger.opens());
        assert!(Decision::OpenForMissingTags.opens());
        assert!(!Decision::KeepClosed.opens());
    }
}
