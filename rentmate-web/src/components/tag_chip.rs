use shared::models::Tag;
use yew::{Callback, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TagChipProps {
    pub tag: Tag,
    #[prop_or_default]
    pub selected: bool,
    #[prop_or_default]
    pub disabled: bool,
    /// Called with the tag id when the chip is clicked.
    pub on_click: Callback<String>,
    /// Label of the trailing action, e.g. "×" for removable chips.
    #[prop_or_default]
    pub action_label: Option<String>,
}

#[function_component(TagChip)]
pub fn tag_chip(props: &TagChipProps) -> Html {
    let onclick = {
        let on_click = props.on_click.clone();
        let tag_id = props.tag.id.clone();
        Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            on_click.emit(tag_id.clone());
        })
    };

    html! {
        <button
            type="button"
            class={classes!(
                "badge",
                "badge-lg",
                "gap-2",
                "cursor-pointer",
                if props.selected { "badge-primary" } else { "badge-outline" }
            )}
            aria-pressed={props.selected.to_string()}
            disabled={props.disabled}
            {onclick}
        >
            {props.tag.name.clone()}
            if let Some(label) = &props.action_label {
                <span aria-hidden="true">{label.clone()}</span>
            }
        </button>
    }
}
