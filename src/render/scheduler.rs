use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::errors::CookieError;

/// A deferred unit of work. Errors propagate out of the commit that ran it.
pub type Effect = Box<dyn FnOnce() -> Result<(), CookieError>>;

/// Post-commit scheduling primitive.
pub trait Scheduler {
    /// Runs `effect` exactly once, after the next commit. Effects run in the
    /// order they were scheduled.
    fn after_commit(&self, effect: Effect);
}

/// FIFO effect queue flushed by the host after each commit.
///
/// Effects scheduled while a commit is running belong to the next commit.
#[derive(Default)]
pub struct CommitQueue {
    pending: RefCell<VecDeque<Effect>>,
    commits: Cell<u64>,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of effects waiting for the next commit.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of commits seen so far.
    pub fn commits(&self) -> u64 {
        self.commits.get()
    }

    /// Marks content as committed and runs every effect scheduled before it.
    ///
    /// Returns how many effects ran. When an effect fails, the ones after it
    /// stay queued (ahead of anything scheduled since) and the error is returned.
    pub fn commit(&self) -> Result<usize, CookieError> {
        self.commits.set(self.commits.get() + 1);

        let mut batch = std::mem::take(&mut *self.pending.borrow_mut());
        let mut ran = 0;
        while let Some(effect) = batch.pop_front() {
            if let Err(e) = effect() {
                let mut pending = self.pending.borrow_mut();
                for effect in batch.into_iter().rev() {
                    pending.push_front(effect);
                }
                return Err(e);
            }
            ran += 1;
        }

        Ok(ran)
    }
}

impl Scheduler for CommitQueue {
    fn after_commit(&self, effect: Effect) {
        self.pending.borrow_mut().push_back(effect);
    }
}

impl std::fmt::Debug for CommitQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitQueue")
            .field("pending", &self.pending())
            .field("commits", &self.commits())
            .finish()
    }
}
