use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::MainRoute;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{ "Page not found" }</h1>
            <Link<MainRoute> to={MainRoute::Home} classes="link">{ "Back to listings" }</Link<MainRoute>>
        </div>
    }
}
