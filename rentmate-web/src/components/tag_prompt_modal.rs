use shared::models::Tag;
use shared::prompt::TagSelection;
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, Properties, function_component, html, use_effect_with, use_state};
use yewdux::prelude::use_selector;

use crate::components::TagChip;
use crate::hooks::TagManagerHandle;
use crate::models::app_state::AppState;

#[derive(Properties, PartialEq)]
pub struct TagPromptModalProps {
    pub manager: TagManagerHandle,
}

/// "Choose your interests" dialog driven by the tag manager.
#[function_component(TagPromptModal)]
pub fn tag_prompt_modal(props: &TagPromptModalProps) -> Html {
    let manager = props.manager.clone();
    let is_open = manager.is_tag_prompt_open();
    let user = use_selector(|state: &AppState| state.user.clone());
    let available = use_state(Vec::<Tag>::new);
    let load_error = use_state(|| None::<String>);
    let selection = use_state(TagSelection::new);

    // Load the catalog and seed the selection every time the prompt opens.
    {
        let coordinator = manager.coordinator().clone();
        let available = available.clone();
        let load_error = load_error.clone();
        let selection = selection.clone();
        let user = (*user).clone();
        use_effect_with(is_open, move |open| {
            if *open {
                selection.set(
                    user.as_ref()
                        .map(TagSelection::from_user)
                        .unwrap_or_default(),
                );
                spawn_local(async move {
                    match coordinator.available_tags().await {
                        Ok(tags) => {
                            available.set(tags);
                            load_error.set(None);
                        }
                        Err(err) => {
                            log::error!("loading interest tags failed: {err}");
                            load_error.set(Some(err.to_string()));
                        }
                    }
                });
            }
            || ()
        });
    }

    if !is_open {
        return html! {};
    }

    let on_toggle = {
        let selection = selection.clone();
        Callback::from(move |tag_id: String| {
            let mut next = (*selection).clone();
            next.toggle(&tag_id);
            selection.set(next);
        })
    };

    let on_save = {
        let selection = selection.clone();
        let save = manager.handle_save_tags();
        Callback::from(move |_: yew::MouseEvent| save.emit(selection.ids().to_vec()))
    };

    let on_skip = {
        let close = manager.handle_close_tag_prompt();
        Callback::from(move |_: yew::MouseEvent| close.emit(()))
    };

    let busy = manager.is_saving();
    let error = manager.error().or_else(|| (*load_error).clone());

    html! {
        <div class="modal modal-open" role="dialog" aria-labelledby="tag-prompt-title">
            <div class="modal-box">
                <h3 id="tag-prompt-title" class="font-bold text-lg">{"What are you looking for?"}</h3>
                <p class="py-2 text-base-content/70">
                    {"Pick a few interests and we'll tailor listings to you."}
                </p>
                if let Some(message) = error {
                    <div class="alert alert-error my-2">
                        <span>{message}</span>
                    </div>
                }
                <div class="flex flex-wrap gap-2 my-4">
                    { for available.iter().map(|tag| html! {
                        <TagChip
                            key={tag.id.clone()}
                            tag={tag.clone()}
                            selected={selection.contains(&tag.id)}
                            disabled={busy}
                            on_click={on_toggle.clone()}
                        />
                    }) }
                </div>
                <div class="modal-action">
                    <button class="btn btn-ghost" type="button" onclick={on_skip} disabled={busy}>
                        {"Skip for now"}
                    </button>
                    <button
                        class="btn btn-primary"
                        type="button"
                        onclick={on_save}
                        disabled={busy}
                    >
                        {if busy { "Saving..." } else { "Save interests" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
