use wasm_bindgen_futures::spawn_local;
use yew::suspense::Suspense;
use yew::{Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

use crate::api::RentalsClient;
use crate::components::Loading;
use crate::containers::layout::Layout;
use crate::models::app_state::AppState;
use crate::routes::{MainRoute, switch};

#[function_component(App)]
pub fn app() -> Html {
    let (store_state, store_dispatch) = use_store::<AppState>();

    {
        let store_dispatch = store_dispatch.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                match RentalsClient::shared().get_profile().await {
                    Ok(user) => {
                        log::debug!("restored session for user {}", user.id);
                        store_dispatch.set(AppState::signed_in(user));
                    }
                    Err(err) => {
                        if !err.is_unauthorized() {
                            log::error!("loading profile failed: {err}");
                        }
                        store_dispatch.set(AppState::signed_out());
                    }
                }
            });
            || ()
        });
    }

    if !store_state.auth_checked {
        return html! { <Loading /> };
    }

    html! {
        <Suspense fallback={ html! { <Loading /> } }>
            <BrowserRouter>
                <Layout>
                    <Switch<MainRoute> render={switch} />
                </Layout>
            </BrowserRouter>
        </Suspense>
    }
}
