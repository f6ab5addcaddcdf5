use parking_lot::Mutex;

use super::{DrawBackend, DrawConfig, DrawQueue, FlushStats};

/// Thread-safe wrapper around a [`DrawQueue`].
///
/// A single coarse lock guards both recording and flushing, so a flush never observes
/// half of an emitter call. Store it behind an `Arc` and share it with worker threads.
#[derive(Debug, Default)]
pub struct SharedDrawQueue {
    queue: Mutex<DrawQueue>,
}

impl SharedDrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DrawConfig) -> Self {
        Self { queue: Mutex::new(DrawQueue::with_config(config)) }
    }

    /// Runs `f` with exclusive access to the queue.
    ///
    /// Keep `f` short; other submitters and the flush wait on the same lock.
    pub fn record<R>(&self, f: impl FnOnce(&mut DrawQueue) -> R) -> R {
        let mut queue = self.queue.lock();
        f(&mut queue)
    }

    /// Drains the queue into `backend`. See [`DrawQueue::flush`].
    pub fn flush(&self, backend: &mut dyn DrawBackend) -> FlushStats {
        self.queue.lock().flush(backend)
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Unwraps the inner queue.
    pub fn into_inner(self) -> DrawQueue {
        self.queue.into_inner()
    }
}
