use yew::{Html, function_component, html};
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[function_component(Header)]
pub fn header() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());

    let account = match &*user {
        Some(user) => html! {
            <>
                <li><Link<MainRoute> to={MainRoute::Interests}>{"My interests"}</Link<MainRoute>></li>
                <li class="px-3 py-2 text-sm text-base-content/70">{user.label().to_string()}</li>
            </>
        },
        None => html! {
            <>
                <li><Link<MainRoute> to={MainRoute::Login}>{"Sign in"}</Link<MainRoute>></li>
                <li><Link<MainRoute> to={MainRoute::Signup}>{"Sign up"}</Link<MainRoute>></li>
            </>
        },
    };

    html! {
        <header class="navbar bg-base-200 border-b border-base-300">
            <div class="flex-1">
                <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-xl">
                    {"Rentmate"}
                </Link<MainRoute>>
            </div>
            <ul class="menu menu-horizontal px-1">
                {account}
            </ul>
        </header>
    }
}
