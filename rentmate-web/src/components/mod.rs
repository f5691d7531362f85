pub(crate) mod loading;
pub(crate) mod tag_chip;
pub(crate) mod tag_prompt_modal;

pub use loading::Loading;
pub use tag_chip::TagChip;
pub use tag_prompt_modal::TagPromptModal;
