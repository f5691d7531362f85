use yew::{Html, function_component, html, use_context};
use yewdux::prelude::use_selector;

use crate::hooks::TagManagerHandle;
use crate::models::app_state::AppState;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let manager = use_context::<TagManagerHandle>();

    let greeting = match &*user {
        Some(user) => format!("Welcome back, {}", user.label()),
        None => "Find your next place".to_string(),
    };

    // Nudge users the prompt would still target, e.g. after skipping it.
    let nudge = match (&*user, manager) {
        (Some(user), Some(manager))
            if !user.has_tags() && !manager.is_tag_prompt_open() =>
        {
            let open = manager.manually_open_tag_prompt();
            let hint = if manager.should_show_tag_prompt_for_user(user) {
                "Tell us what matters to you and we'll tailor listings."
            } else {
                "You skipped choosing interests. Add some any time."
            };
            html! {
                <div class="alert my-4">
                    <span>{hint}</span>
                    <button class="btn btn-sm btn-primary" onclick={move |_| open.emit(())}>
                        {"Choose interests"}
                    </button>
                </div>
            }
        }
        _ => html! {},
    };

    html! {
        <div class="space-y-4">
            <h1 class="text-3xl font-bold">{greeting}</h1>
            {nudge}
        </div>
    }
}
