//! Pending entries and the engine's three queues.

use crate::core::Outcome;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

/// Which holding area an entry is kept in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// High priority, drained first.
    Posted,
    /// Low priority, drained after everything else.
    Deferred,
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posted => f.write_str("post"),
            Self::Deferred => f.write_str("defer"),
        }
    }
}

/// A captured event plus the logic to offer it to whichever state is active
/// when it is retried.
///
/// `T` is the target the entry re-dispatches through (the engine's shared
/// core). The entry owns its event, so it stays valid after the call that
/// created it has returned.
pub(crate) struct Pending<T: ?Sized> {
    event: &'static str,
    redispatch: Box<dyn Fn(&T) -> Outcome + Send>,
}

impl<T: ?Sized> Pending<T> {
    pub(crate) fn new<F>(event: &'static str, redispatch: F) -> Self
    where
        F: Fn(&T) -> Outcome + Send + 'static,
    {
        Self {
            event,
            redispatch: Box::new(redispatch),
        }
    }

    pub(crate) fn event(&self) -> &'static str {
        self.event
    }

    pub(crate) fn redispatch(&self, target: &T) -> Outcome {
        (self.redispatch)(target)
    }
}

/// Posted, deferred and working queues.
pub(crate) struct Queues<T: ?Sized> {
    posted: VecDeque<Pending<T>>,
    deferred: VecDeque<Pending<T>>,
    working: VecDeque<Pending<T>>,
}

impl<T: ?Sized> Default for Queues<T> {
    fn default() -> Self {
        Self {
            posted: VecDeque::new(),
            deferred: VecDeque::new(),
            working: VecDeque::new(),
        }
    }
}

impl<T: ?Sized> Queues<T> {
    pub(crate) fn push(&mut self, queue: QueueKind, entry: Pending<T>) {
        match queue {
            QueueKind::Posted => self.posted.push_back(entry),
            QueueKind::Deferred => self.deferred.push_back(entry),
        }
    }

    /// Start of a drain pass: posted entries go to the front of the working
    /// queue, deferred entries to its back. Whatever an interrupted pass left
    /// in the working queue stays between the two.
    pub(crate) fn merge(&mut self) -> usize {
        let mut working = mem::take(&mut self.posted);
        working.append(&mut self.working);
        working.append(&mut self.deferred);
        self.working = working;
        self.working.len()
    }

    pub(crate) fn pop_working(&mut self) -> Option<Pending<T>> {
        self.working.pop_front()
    }

    pub(crate) fn posted_len(&self) -> usize {
        self.posted.len()
    }

    pub(crate) fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.posted.len() + self.deferred.len() + self.working.len()
    }
}
