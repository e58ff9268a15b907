//! Bounded single-consumer command queue.
//!
//! Replaces the shared "last key" variable a producer thread and the engine
//! would otherwise race on: the producer pushes decoded events, the scheduler
//! drains them strictly in arrival order between gravity ticks. Pushing never
//! blocks; events offered to a full queue are dropped.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError, TrySendError};

use arrayvec::ArrayVec;

use tetrohash_types::COMMAND_QUEUE_DEPTH;

use crate::map::InputEvent;

/// Producer handle. Cheap to clone into the input thread.
#[derive(Clone)]
pub struct CommandSender {
    tx: SyncSender<InputEvent>,
}

/// Consumer handle, held by the scheduler loop.
pub struct CommandQueue {
    rx: Receiver<InputEvent>,
}

/// Create a connected producer/consumer pair with the given capacity.
pub fn command_queue(depth: usize) -> (CommandSender, CommandQueue) {
    let (tx, rx) = sync_channel(depth);
    (CommandSender { tx }, CommandQueue { rx })
}

impl CommandSender {
    /// Offer an event to the queue. Returns false when the event was dropped
    /// (queue full or consumer gone).
    pub fn push(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl CommandQueue {
    /// Drain everything queued so far, in arrival order, without blocking.
    pub fn drain(&self) -> ArrayVec<InputEvent, COMMAND_QUEUE_DEPTH> {
        let mut events = ArrayVec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if events.try_push(event).is_err() {
                        break;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}
