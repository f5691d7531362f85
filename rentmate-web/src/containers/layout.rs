use yew::{Children, ContextProvider, Html, Properties, function_component, html};

use crate::components::TagPromptModal;
use crate::containers::header::Header;
use crate::hooks::{TagManagerHandle, use_tag_manager};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

/// Page chrome. Hosts the interest-tag prompt so it follows the user across
/// every route, and shares its handle with pages through context.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let manager = use_tag_manager();

    html! {
        <ContextProvider<TagManagerHandle> context={manager.clone()}>
            <Header />
            <main class="min-h-screen bg-base-100 p-4">
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"© 2025 Rentmate"}</p>
            </footer>
            <TagPromptModal {manager} />
        </ContextProvider<TagManagerHandle>>
    }
}
