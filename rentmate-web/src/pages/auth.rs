use shared::models::{LoginRequest, SignupRequest};
use shared::services::ServiceError;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_store;

use crate::api::RentalsClient;
use crate::hooks::TagManagerHandle;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Signup => "Create your account",
        }
    }

    fn busy_label(self) -> &'static str {
        match self {
            Self::Login => "Signing in...",
            Self::Signup => "Creating account...",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub mode: AuthMode,
}

fn failure_message(mode: AuthMode, err: &ServiceError) -> String {
    match (mode, err.status()) {
        (_, None) => "Unable to connect to server".to_string(),
        (AuthMode::Login, Some(401)) => "Invalid credentials".to_string(),
        (AuthMode::Signup, Some(409)) => "An account with this email already exists".to_string(),
        (AuthMode::Login, Some(status)) => format!("Login failed: {status}"),
        (AuthMode::Signup, Some(status)) => format!("Signup failed: {status}"),
    }
}

fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

/// Login and signup form. A successful submit raises the matching tag prompt
/// trigger before the user lands in the store, so the prompt opens on the
/// next page.
#[function_component(AuthPage)]
pub fn auth_page(props: &AuthPageProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let display_name = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();
    let manager = use_context::<TagManagerHandle>();
    let (_, dispatch) = use_store::<AppState>();
    let mode = props.mode;

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let display_name = display_name.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email_value = (*email).clone();
            let password_value = (*password).clone();
            let display_name_value = Some((*display_name).trim().to_string())
                .filter(|name| !name.is_empty());
            loading.set(true);
            error.set(None);

            let loading = loading.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            let manager = manager.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let client = RentalsClient::shared();
                let result = match mode {
                    AuthMode::Login => {
                        client
                            .login(&LoginRequest {
                                email: email_value,
                                password: password_value,
                            })
                            .await
                    }
                    AuthMode::Signup => {
                        client
                            .signup(&SignupRequest {
                                email: email_value,
                                password: password_value,
                                display_name: display_name_value,
                            })
                            .await
                    }
                };

                match result {
                    Ok(user) => {
                        if let Some(manager) = &manager {
                            match mode {
                                AuthMode::Login => manager.trigger_tag_prompt_for_login(),
                                AuthMode::Signup => manager.trigger_tag_prompt_for_signup(),
                            }
                        }
                        dispatch.set(AppState::signed_in(user));
                        if let Some(nav) = &navigator {
                            nav.push(&MainRoute::Home);
                        }
                    }
                    Err(err) => {
                        log::warn!("{} failed: {err}", mode.title());
                        error.set(Some(failure_message(mode, &err)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let is_busy = *loading;
    let disable_submit = email.is_empty() || password.is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{mode.title()}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    if mode == AuthMode::Signup {
                        <div class="form-control">
                            <label class="label" for="display-name">
                                <span class="label-text">{"Name"}</span>
                            </label>
                            <input
                                id="display-name"
                                class="input input-bordered"
                                type="text"
                                value={(*display_name).clone()}
                                oninput={bind_input(&display_name)}
                            />
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            required=true
                            value={(*email).clone()}
                            oninput={bind_input(&email)}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={bind_input(&password)}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { mode.busy_label() } else { mode.title() }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
