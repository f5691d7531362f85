//! Interest-tag prompt coordination.
//!
//! Decides, across page loads and late-arriving auth data, whether the
//! "choose your interests" modal should be shown to the current user. The
//! pieces are independent of any UI framework; the web crate wires them to
//! `sessionStorage`, timers and yew state.

mod coordinator;
mod decision;
mod error;
mod flags;
mod gate;
mod hydration;
mod machine;
mod poller;
mod selection;

pub use coordinator::TagPromptCoordinator;
pub use decision::{Decision, consume_auth_trigger, decide, has_auth_trigger};
pub use error::PromptError;
pub use flags::{MemoryFlagStore, SessionFlag, SessionFlagStore};
pub use gate::{CheckGate, should_evaluate};
pub use hydration::Hydration;
pub use machine::{CloseReason, OpenReason, PromptEvent, PromptState};
pub use poller::{PollOutcome, PollSchedule, PollStep, PollerHandle, TriggerPoller};
pub use selection::TagSelection;
