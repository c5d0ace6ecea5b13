//! Pending-input queue.
//!
//! Events may be produced anywhere (input callbacks, other threads, hooks of
//! the machine itself) but are only consumed by `update`, one per tick. The
//! queue is an unbounded crossbeam channel: producers hold senders, the
//! machine owns the receiver.

use crossbeam::channel::{self, Receiver, Sender};
use std::fmt;

/// FIFO of events waiting to be consumed by the machine.
pub struct InputQueue<E> {
    send: Sender<E>,
    recv: Receiver<E>,
}

impl<E> InputQueue<E> {
    pub fn new() -> Self {
        let (send, recv) = channel::unbounded();
        Self { send, recv }
    }

    pub fn push(&self, event: E) {
        // the queue owns the receiver, so the channel is never disconnected here
        let _ = self.send.send(event);
    }

    /// Remove the oldest pending event.
    pub fn pop(&self) -> Option<E> {
        self.recv.try_recv().ok()
    }

    pub fn len(&self) -> usize {
        self.recv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recv.is_empty()
    }

    pub fn clear(&self) {
        self.recv.try_iter().for_each(drop);
    }

    /// Handle that enqueues into this queue from anywhere.
    pub fn sender(&self) -> InputSender<E> {
        InputSender {
            send: self.send.clone(),
        }
    }
}

impl<E> Default for InputQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for InputQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputQueue")
            .field("pending", &self.len())
            .finish()
    }
}

/// Cloneable producer end of a machine's input queue.
///
/// Senders can be moved into keyboard handlers, other threads or the
/// machine's own hooks. Events sent after the machine is dropped are
/// discarded.
pub struct InputSender<E> {
    send: Sender<E>,
}

impl<E> InputSender<E> {
    pub fn send(&self, event: E) {
        if self.send.send(event).is_err() {
            tracing::trace!("input dropped, machine no longer exists");
        }
    }

    /// Number of events not yet consumed by the machine.
    pub fn pending(&self) -> usize {
        self.send.len()
    }
}

impl<E> Clone for InputSender<E> {
    fn clone(&self) -> Self {
        Self {
            send: self.send.clone(),
        }
    }
}

impl<E> fmt::Debug for InputSender<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSender")
            .field("pending", &self.pending())
            .finish()
    }
}
