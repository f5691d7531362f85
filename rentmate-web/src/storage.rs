use shared::prompt::SessionFlagStore;
use web_sys::Storage;

/// Prompt flags kept in the browser's `sessionStorage`.
///
/// Values are stored raw (not JSON encoded) so flags written by other parts
/// of the site read back as plain `"true"`. When storage is blocked every
/// flag reads as absent and writes are dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct BrowserSessionFlags {
    storage: Option<Storage>,
}

impl BrowserSessionFlags {
    /// Binds to the window's `sessionStorage`, if the page may use it.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.session_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("sessionStorage is unavailable; tag prompt flags will not persist");
        }
        Self::with_storage(storage)
    }

    pub fn with_storage(storage: Option<Storage>) -> Self {
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

impl SessionFlagStore for BrowserSessionFlags {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            log::warn!("dropping session flag {key}: no sessionStorage");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("failed to write session flag {key}: {err:?}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = &self.storage else {
            log::warn!("cannot clear session flag {key}: no sessionStorage");
            return;
        };
        if let Err(err) = storage.remove_item(key) {
            log::warn!("failed to clear session flag {key}: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Tag, UserRecord};
    use shared::prompt::{Decision, SessionFlag, decide};

    #[test]
    fn test_missing_storage_reads_nothing_and_keeps_prompt_closed() {
        let flags = BrowserSessionFlags::with_storage(None);
        assert!(!flags.is_available());

        flags.raise(SessionFlag::TriggerAfterLogin);
        flags.clear(SessionFlag::SkippedTagPrompt);

        assert_eq!(flags.get(SessionFlag::TriggerAfterLogin.key()), None);
        assert!(!flags.is_raised(SessionFlag::TriggerAfterLogin));
        let tagged = UserRecord::new("u1").with_tags(vec![Tag::new("1", "Pets")]);
        assert_eq!(decide(Some(&tagged), &flags), Decision::KeepClosed);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use gloo_storage::{SessionStorage, Storage as _};
    use shared::prompt::SessionFlag;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_flags_round_trip_through_session_storage() {
        let flags = BrowserSessionFlags::new();
        assert!(flags.is_available());
        flags.clear(SessionFlag::SkippedTagPrompt);
        assert!(!flags.is_raised(SessionFlag::SkippedTagPrompt));

        flags.raise(SessionFlag::SkippedTagPrompt);
        assert_eq!(
            SessionStorage::raw()
                .get_item("skippedTagPrompt")
                .ok()
                .flatten()
                .as_deref(),
            Some("true")
        );

        flags.clear(SessionFlag::SkippedTagPrompt);
        assert_eq!(flags.get("skippedTagPrompt"), None);
    }
}
