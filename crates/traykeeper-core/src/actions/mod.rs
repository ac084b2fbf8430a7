mod action_queue;

pub use action_queue::{Action, ActionQueue};
