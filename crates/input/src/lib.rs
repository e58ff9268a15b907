//! Input collaborator: key mapping plus the bounded command queue.
//!
//! A dedicated producer thread maps raw key events into the closed command
//! vocabulary and pushes them into a bounded queue; the scheduler loop drains
//! the queue in arrival order before each gravity tick. Unrecognized keys are
//! ignored, never an error.

pub mod map;
pub mod queue;

pub use map::{map_key, InputEvent};
pub use queue::{command_queue, CommandQueue, CommandSender};
