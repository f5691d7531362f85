mod use_tag_manager;

pub use use_tag_manager::{TagManagerHandle, use_tag_manager};
