use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use shared::models::UserRecord;
use shared::prompt::{
    Hydration, PollOutcome, PollerHandle, PromptState, TagPromptCoordinator, TriggerPoller,
};
use wasm_bindgen_futures::spawn_local;
use yew::{
    Callback, UseStateHandle, hook, use_effect_with, use_memo, use_mut_ref, use_state,
};
use yewdux::prelude::use_store;

use crate::api::RentalsClient;
use crate::config::FrontendConfig;
use crate::models::app_state::{AppState, StoreUserProvider};
use crate::storage::BrowserSessionFlags;

/// What the tag prompt exposes to components.
#[derive(Clone)]
pub struct TagManagerHandle {
    coordinator: TagPromptCoordinator,
    state: UseStateHandle<PromptState>,
    saving: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
    rearm: UseStateHandle<u32>,
    poll: Rc<RefCell<Option<PollerHandle>>>,
}

impl PartialEq for TagManagerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.coordinator.ptr_eq(&other.coordinator)
            && *self.state == *other.state
            && *self.saving == *other.saving
            && *self.error == *other.error
            && *self.rearm == *other.rearm
    }
}

impl TagManagerHandle {
    pub fn is_tag_prompt_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_saving(&self) -> bool {
        *self.saving
    }

    /// Message from the last failed save, shown inside the prompt.
    pub fn error(&self) -> Option<String> {
        (*self.error).clone()
    }

    /// Whether a trigger poll is still waiting for user data.
    pub fn is_polling(&self) -> bool {
        self.poll.borrow().as_ref().is_some_and(PollerHandle::is_active)
    }

    pub fn coordinator(&self) -> &TagPromptCoordinator {
        &self.coordinator
    }

    /// Saves the selected tag ids; the prompt stays open with an error
    /// message when the save fails.
    pub fn handle_save_tags(&self) -> Callback<Vec<String>> {
        let coordinator = self.coordinator.clone();
        let state = self.state.clone();
        let saving = self.saving.clone();
        let error = self.error.clone();
        Callback::from(move |tag_ids: Vec<String>| {
            let coordinator = coordinator.clone();
            let state = state.clone();
            let saving = saving.clone();
            let error = error.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                match coordinator.save(&tag_ids).await {
                    Ok(_) => state.set(coordinator.state()),
                    Err(err) => {
                        log::error!("saving interest tags failed: {err}");
                        error.set(Some(err.to_string()));
                    }
                }
                saving.set(false);
            });
        })
    }

    /// Skip: closes the prompt for the rest of the session.
    pub fn handle_close_tag_prompt(&self) -> Callback<()> {
        let coordinator = self.coordinator.clone();
        let state = self.state.clone();
        let error = self.error.clone();
        Callback::from(move |()| {
            coordinator.skip();
            error.set(None);
            state.set(coordinator.state());
        })
    }

    pub fn manually_open_tag_prompt(&self) -> Callback<()> {
        let coordinator = self.coordinator.clone();
        let state = self.state.clone();
        Callback::from(move |()| {
            coordinator.manually_open();
            state.set(coordinator.state());
        })
    }

    pub fn should_show_tag_prompt_for_user(&self, user: &UserRecord) -> bool {
        self.coordinator.should_show_for_user(user)
    }

    /// Raises the login trigger and restarts the trigger poll.
    pub fn trigger_tag_prompt_for_login(&self) {
        self.coordinator.trigger_for_login();
        self.rearm.set(*self.rearm + 1);
    }

    /// Raises the signup trigger and restarts the trigger poll.
    pub fn trigger_tag_prompt_for_signup(&self) {
        self.coordinator.trigger_for_signup();
        self.rearm.set(*self.rearm + 1);
    }
}

fn browser_sleep(duration: Duration) -> TimeoutFuture {
    TimeoutFuture::new(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX))
}

/// Hosts the interest-tag prompt for the lifetime of the calling component.
#[hook]
pub fn use_tag_manager() -> TagManagerHandle {
    let (app_state, dispatch) = use_store::<AppState>();
    let config = use_memo((), |()| FrontendConfig::new());
    let coordinator = use_memo((), move |()| {
        let client = RentalsClient::shared();
        TagPromptCoordinator::new(
            Rc::new(BrowserSessionFlags::new()),
            Rc::new(client.clone()),
            Rc::new(StoreUserProvider::new(dispatch, client)),
        )
    });
    let coordinator = (*coordinator).clone();
    let hydration = use_memo((), |()| Hydration::new());
    let state = use_state(|| coordinator.state());
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let rearm = use_state(|| 0_u32);
    let poll_handle = use_mut_ref(|| None::<PollerHandle>);

    // Every user change is fed to the coordinator; the first one also
    // resolves the hydration signal the trigger poll waits on.
    {
        let coordinator = coordinator.clone();
        let state = state.clone();
        let hydration = (*hydration).clone();
        use_effect_with(app_state.user.clone(), move |user| {
            if user.is_some() {
                hydration.resolve();
            }
            state.set(coordinator.observe_user(user.as_ref()));
            || ()
        });
    }

    // Safety net for a trigger raised right before navigation while the
    // user record is still loading.
    {
        let coordinator = coordinator.clone();
        let state = state.clone();
        let hydration = (*hydration).clone();
        let poller = TriggerPoller::new(config.prompt.schedule());
        let poll_handle = poll_handle.clone();
        use_effect_with(*rearm, move |_| {
            if let Some((handle, polling)) =
                coordinator.start_trigger_poll(&poller, &hydration, browser_sleep)
            {
                poll_handle.borrow_mut().replace(handle);
                let coordinator = coordinator.clone();
                spawn_local(async move {
                    let outcome = polling.await;
                    log::debug!("tag prompt trigger poll ended: {outcome:?}");
                    if outcome == PollOutcome::Opened {
                        state.set(coordinator.state());
                    }
                });
            }
            move || {
                poll_handle.borrow_mut().take();
            }
        });
    }

    TagManagerHandle {
        coordinator,
        state,
        saving,
        error,
        rearm,
        poll: poll_handle,
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use shared::prompt::{SessionFlag, SessionFlagStore};
    use wasm_bindgen_test::*;
    use yew::{Html, Properties, Renderer, function_component, html};
    use yewdux::{Dispatch, YewduxRoot};

    wasm_bindgen_test_configure!(run_in_browser);

    type Slot = Rc<RefCell<Option<(TagManagerHandle, Dispatch<AppState>)>>>;

    #[derive(Clone)]
    struct Captured(Slot);

    impl PartialEq for Captured {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    #[derive(Properties, PartialEq)]
    struct HostProps {
        captured: Captured,
    }

    #[function_component(Capture)]
    fn capture(props: &HostProps) -> Html {
        let manager = use_tag_manager();
        let (_, dispatch) = use_store::<AppState>();
        props.captured.0.borrow_mut().replace((manager, dispatch));
        html! {}
    }

    #[function_component(Host)]
    fn host(props: &HostProps) -> Html {
        html! {
            <YewduxRoot>
                <Capture captured={props.captured.clone()} />
            </YewduxRoot>
        }
    }

    fn latest(slot: &Slot) -> (TagManagerHandle, Dispatch<AppState>) {
        slot.borrow().clone().expect("hook rendered")
    }

    fn mount(slot: &Slot) -> yew::AppHandle<Host> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document");
        let root = document.create_element("div").expect("div");
        document
            .body()
            .expect("body")
            .append_child(&root)
            .expect("attach root");
        Renderer::<Host>::with_root_and_props(
            root,
            HostProps {
                captured: Captured(Rc::clone(slot)),
            },
        )
        .render()
    }

    fn reset_flags() {
        let flags = BrowserSessionFlags::new();
        for flag in [
            SessionFlag::SkippedTagPrompt,
            SessionFlag::TriggerAfterLogin,
            SessionFlag::TriggerAfterSignup,
            SessionFlag::LastCheckedUserId,
        ] {
            flags.clear(flag);
        }
    }

    async fn settle() {
        TimeoutFuture::new(20).await;
    }

    #[wasm_bindgen_test]
    async fn test_login_trigger_polls_until_user_arrives() {
        reset_flags();
        let slot = Slot::default();
        let app = mount(&slot);
        settle().await;

        let (manager, dispatch) = latest(&slot);
        assert!(!manager.is_polling());
        manager.trigger_tag_prompt_for_login();
        settle().await;

        let (manager, _) = latest(&slot);
        assert!(manager.is_polling());
        assert!(!manager.is_tag_prompt_open());

        dispatch.set(AppState::signed_in(UserRecord::new("u1")));
        settle().await;

        let (manager, _) = latest(&slot);
        assert!(manager.is_tag_prompt_open());
        assert!(!manager.is_polling());
        assert!(!BrowserSessionFlags::new().is_raised(SessionFlag::TriggerAfterLogin));
        app.destroy();
    }

    #[wasm_bindgen_test]
    async fn test_unmount_drops_running_poll() {
        reset_flags();
        let slot = Slot::default();
        let app = mount(&slot);
        settle().await;

        latest(&slot).0.trigger_tag_prompt_for_signup();
        settle().await;
        let (manager, _) = latest(&slot);
        assert!(manager.is_polling());

        app.destroy();
        settle().await;

        assert!(!manager.is_polling());
        assert!(BrowserSessionFlags::new().is_raised(SessionFlag::TriggerAfterSignup));
        reset_flags();
    }
}
