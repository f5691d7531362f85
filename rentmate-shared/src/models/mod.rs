/// Login and signup payloads.
pub mod auth;
/// API error bodies.
pub mod errors;
/// Tags and the user record.
pub mod tag;

pub use auth::{LoginRequest, SignupRequest};
pub use errors::ErrorResponse;
pub use tag::{Tag, UpdateUserTagsRequest, UserRecord};
