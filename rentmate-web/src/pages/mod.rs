mod auth;
mod home;
mod interests;
mod not_found;

pub use auth::{AuthMode, AuthPage};
pub use home::HomePage;
pub use interests::InterestsPage;
pub use not_found::NotFoundPage;
