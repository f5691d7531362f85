use shared::models::Tag;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Redirect;
use yewdux::prelude::use_selector;

use crate::components::{Loading, TagChip};
use crate::hooks::TagManagerHandle;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

/// Lists the signed-in user's interest tags and lets them drop one.
#[function_component(InterestsPage)]
pub fn interests_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let manager = use_context::<TagManagerHandle>();
    let tags = use_state(|| None::<Vec<Tag>>);
    let error = use_state(|| None::<String>);
    let removing = use_state(|| None::<String>);
    let reload = use_state(|| 0_u32);

    // Reload whenever the user record changes, which includes the refresh
    // after a save from the prompt.
    {
        let manager = manager.clone();
        let tags = tags.clone();
        let error = error.clone();
        use_effect_with(((*user).clone(), *reload), move |(user, _)| {
            if let (Some(_), Some(manager)) = (user, manager) {
                let coordinator = manager.coordinator().clone();
                spawn_local(async move {
                    match coordinator.user_tags().await {
                        Ok(loaded) => {
                            tags.set(Some(loaded));
                            error.set(None);
                        }
                        Err(err) => {
                            log::error!("loading interest tags failed: {err}");
                            error.set(Some(err.to_string()));
                            tags.set(Some(Vec::new()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let Some(manager) = manager else {
        return html! { <Loading /> };
    };
    if user.is_none() {
        return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
    }

    let on_remove = {
        let coordinator = manager.coordinator().clone();
        let error = error.clone();
        let removing = removing.clone();
        let reload = reload.clone();
        Callback::from(move |tag_id: String| {
            let coordinator = coordinator.clone();
            let error = error.clone();
            let removing = removing.clone();
            let reload = reload.clone();
            removing.set(Some(tag_id.clone()));
            spawn_local(async move {
                match coordinator.remove_tag(&tag_id).await {
                    // A refreshed user re-runs the load above on its own.
                    Ok(Some(_)) => {}
                    Ok(None) => reload.set(*reload + 1),
                    Err(err) => {
                        log::error!("removing interest tag {tag_id} failed: {err}");
                        error.set(Some(err.to_string()));
                    }
                }
                removing.set(None);
            });
        })
    };

    let edit = manager.manually_open_tag_prompt();
    let busy = removing.is_some();

    let body = match &*tags {
        None => html! { <Loading /> },
        Some(list) if list.is_empty() => html! {
            <p class="opacity-70">{"You haven't picked any interests yet."}</p>
        },
        Some(list) => html! {
            <div class="flex flex-wrap gap-2">
                { for list.iter().map(|tag| html! {
                    <TagChip
                        key={tag.id.clone()}
                        tag={tag.clone()}
                        selected=true
                        disabled={busy}
                        on_click={on_remove.clone()}
                        action_label={Some("×".to_string())}
                    />
                }) }
            </div>
        },
    };

    html! {
        <div class="max-w-2xl mx-auto space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Your interests"}</h1>
                <button class="btn btn-primary btn-sm" onclick={move |_| edit.emit(())}>
                    {"Edit interests"}
                </button>
            </div>
            if let Some(message) = &*error {
                <div class="alert alert-error">
                    <span>{message.clone()}</span>
                </div>
            }
            {body}
        </div>
    }
}
