use std::cell::RefCell;
use std::collections::HashMap;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Value stored for a raised boolean flag.
pub const FLAG_TRUE: &str = "true";

/// Keys the prompt reads and writes in the session store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum SessionFlag {
    /// The user dismissed the prompt during this session.
    #[strum(serialize = "skippedTagPrompt")]
    SkippedTagPrompt,
    /// A login just completed and the prompt should open once user data is in.
    #[strum(serialize = "triggerTagPromptAfterLogin")]
    TriggerAfterLogin,
    /// A signup just completed; handled the same way as a login.
    #[strum(serialize = "triggerTagPromptAfterSignup")]
    TriggerAfterSignup,
    /// Id of the last user the prompt evaluated.
    #[strum(serialize = "lastCheckedUserId")]
    LastCheckedUserId,
}

impl SessionFlag {
    /// Flags raised by the login and signup flows. Either one opens the
    /// prompt.
    pub const AUTH_TRIGGERS: [Self; 2] = [Self::TriggerAfterLogin, Self::TriggerAfterSignup];

    /// Storage key, identical to the names other pages of the site use.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Session-scoped string key/value store shared by every view of a session.
///
/// Methods take `&self`: the browser store is a shared handle, and the
/// in-memory store uses interior mutability to match.
pub trait SessionFlagStore {
    /// Raw value under `key`, `None` when unset or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`. Write failures are not reported.
    fn set(&self, key: &str, value: &str);

    /// Deletes `key`; missing keys are ignored.
    fn remove(&self, key: &str);

    /// Whether `flag` holds exactly `"true"`.
    fn is_raised(&self, flag: SessionFlag) -> bool {
        self.get(flag.key()).as_deref() == Some(FLAG_TRUE)
    }

    /// Sets `flag` to `"true"`.
    fn raise(&self, flag: SessionFlag) {
        self.set(flag.key(), FLAG_TRUE);
    }

    /// Removes `flag` entirely.
    fn clear(&self, flag: SessionFlag) {
        self.remove(flag.key());
    }
}

/// In-memory [`SessionFlagStore`], used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryFlagStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no key is set.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of every entry, for assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl SessionFlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
