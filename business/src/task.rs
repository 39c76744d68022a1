//! Generation-tagged background work with cooperative cancellation.
//!
//! Every file selection starts a new generation. Only the newest generation
//! may publish its result; older work is cancelled through its
//! `CancellationToken` and any result it still delivers is ignored.

use tokio_util::sync::CancellationToken;

/// Handle to one decode, shared between the controller and the decoder.
#[derive(Debug, Clone)]
pub struct DecodeTask {
    generation: u64,
    cancel_token: CancellationToken,
}

impl DecodeTask {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Higher generations belong to more recent selections.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Requests that the work stop at its next check point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Tracks the single decode whose result is still wanted.
#[derive(Debug, Default)]
pub struct TaskSlot {
    last_generation: u64,
    current: Option<DecodeTask>,
}

impl TaskSlot {
    /// Cancels whatever is in flight without starting anything new.
    ///
    /// The generation still advances so late results from the cancelled
    /// work can never match.
    pub fn invalidate(&mut self) {
        self.last_generation += 1;
        if let Some(task) = self.current.take() {
            task.cancel();
        }
    }

    /// Cancels the current task and returns a fresh one that replaces it.
    pub fn begin(&mut self) -> DecodeTask {
        self.invalidate();
        let task = DecodeTask::new(self.last_generation);
        self.current = Some(task.clone());
        task
    }

    /// True if `generation` is the task still being waited on.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|task| task.generation() == generation)
    }

    /// Marks the current task as done if it matches `generation`.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.is_current(generation) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Generation of the most recent selection.
    pub fn generation(&self) -> u64 {
        self.last_generation
    }
}
