use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{AuthMode, AuthPage, HomePage, InterestsPage, NotFoundPage};

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/interests")]
    Interests,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: MainRoute) -> Html {
    match route {
        MainRoute::Home => html! { <HomePage /> },
        MainRoute::Login => html! { <AuthPage mode={AuthMode::Login} /> },
        MainRoute::Signup => html! { <AuthPage mode={AuthMode::Signup} /> },
        MainRoute::Interests => html! { <InterestsPage /> },
        MainRoute::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(MainRoute::Home.to_path(), "/");
        assert_eq!(MainRoute::Login.to_path(), "/login");
        assert_eq!(MainRoute::Signup.to_path(), "/signup");
        assert_eq!(MainRoute::Interests.to_path(), "/interests");
    }

    #[test]
    fn test_route_recognition() {
        assert_eq!(MainRoute::recognize("/interests"), Some(MainRoute::Interests));
        assert_eq!(MainRoute::recognize("/signup"), Some(MainRoute::Signup));
    }
}
