//! Engine core shared between a `Context` and the bindings it hands out.
//!
//! Every operation takes the same reentrant lock, so a reaction running under
//! the lock may call back into the engine (`transit`, `post_event`) on the
//! same thread. `RefCell` borrows are kept short and are never held while
//! user code (reactions, constructors, destructors, sinks) runs.

use super::binding::{Binding, Enter};
use super::error::DomainError;
use super::queue::{Pending, QueueKind, Queues};
use crate::core::{Event, Outcome, State};
use crate::trace::{TraceEvent, TraceSink};
use parking_lot::ReentrantMutex;
use std::any::type_name;
use std::cell::RefCell;
use std::sync::Arc;

pub(crate) struct Shared<S: ?Sized, D> {
    lock: ReentrantMutex<Core<S, D>>,
    sink: Arc<dyn TraceSink>,
}

struct Core<S: ?Sized, D> {
    slot: RefCell<Slot<S, D>>,
    domain: RefCell<D>,
}

struct Slot<S: ?Sized, D> {
    /// `None` before the first transition, and while the active state is
    /// lent out to one of its own reactions.
    state: Option<Box<S>>,
    active: Option<&'static str>,
    /// Bumped by every transition; tells a lender whether its state was
    /// replaced while it was out.
    generation: u64,
    queues: Queues<Shared<S, D>>,
}

/// Clears the active name if a lent state never comes back.
struct LendGuard<'a, S: ?Sized, D> {
    slot: &'a RefCell<Slot<S, D>>,
    generation: u64,
    armed: bool,
}

impl<S: ?Sized, D> LendGuard<'_, S, D> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: ?Sized, D> Drop for LendGuard<'_, S, D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            if slot.generation == self.generation {
                slot.active = None;
            }
        }
    }
}

impl<S: ?Sized + State + 'static, D: 'static> Shared<S, D> {
    pub(crate) fn new(domain: D, sink: Arc<dyn TraceSink>) -> Self {
        Self {
            lock: ReentrantMutex::new(Core {
                slot: RefCell::new(Slot {
                    state: None,
                    active: None,
                    generation: 0,
                    queues: Queues::default(),
                }),
                domain: RefCell::new(domain),
            }),
            sink,
        }
    }

    fn emit(&self, event: TraceEvent) {
        self.sink.record(&event);
    }

    pub(crate) fn process_event<E: Event<S>>(&self, event: E) -> Outcome {
        let _core = self.lock.lock();

        let outcome = self.dispatch(&event);
        match outcome {
            Outcome::DeferredEvent => self.enqueue(QueueKind::Deferred, event),
            Outcome::TransitState => self.drain(),
            Outcome::PostedEvent => {
                self.enqueue(QueueKind::Posted, event);
                self.drain();
            }
            Outcome::UnknownContext
            | Outcome::UnknownState
            | Outcome::UnconsumedEvent
            | Outcome::DiscardedEvent => {}
        }
        outcome
    }

    /// Queue `event` with high priority without draining.
    pub(crate) fn post_event<E: Event<S>>(&self, event: E) {
        self.enqueue(QueueKind::Posted, event);
    }

    /// Replace the active state with a fresh `N`, then run a drain pass.
    pub(crate) fn transit<N: Enter<S, D>>(self: &Arc<Self>) {
        let core = self.lock.lock();

        let next = N::enter(Binding::bound(N::NAME, Arc::downgrade(self)));
        let (previous, from) = {
            let mut slot = core.slot.borrow_mut();
            slot.generation = slot.generation.wrapping_add(1);
            let from = slot.active.replace(N::NAME);
            (slot.state.replace(next), from)
        };
        drop(previous);

        match from {
            Some(from) => self.emit(TraceEvent::Transition { from, to: N::NAME }),
            None => self.emit(TraceEvent::Initialized { state: N::NAME }),
        }

        self.drain();
    }

    /// Offer `event` to the active state.
    ///
    /// `Delivering` is recorded before the reaction runs and `Dispatched`
    /// after it returns, so anything the reaction triggers sits between them.
    fn dispatch<E: Event<S>>(&self, event: &E) -> Outcome {
        let name = type_name::<E>();
        let lent = self.lend(|state, active| {
            self.emit(TraceEvent::Delivering {
                state: active,
                event: name,
            });
            event.deliver(state)
        });
        let (state, outcome) = match lent {
            Some((outcome, state)) => (Some(state), outcome),
            None => (None, Outcome::UnknownState),
        };
        self.emit(TraceEvent::Dispatched {
            state,
            event: name,
            outcome,
        });
        outcome
    }

    /// Move the active state out of its slot for the duration of `f`.
    ///
    /// If `f` transitions the engine, the lent instance is dropped when `f`
    /// returns instead of being put back. If `f` unwinds, the instance is
    /// lost and the engine is left without an active state.
    fn lend<R>(&self, f: impl FnOnce(&mut S, &'static str) -> R) -> Option<(R, &'static str)> {
        let core = self.lock.lock();

        let (mut state, generation, name) = {
            let mut slot = core.slot.borrow_mut();
            let state = slot.state.take()?;
            (state, slot.generation, slot.active.unwrap_or_default())
        };

        let guard = LendGuard {
            slot: &core.slot,
            generation,
            armed: true,
        };
        let result = f(&mut *state, name);
        guard.disarm();

        let retired = {
            let mut slot = core.slot.borrow_mut();
            if slot.generation == generation {
                slot.state = Some(state);
                None
            } else {
                Some(state)
            }
        };
        drop(retired);

        Some((result, name))
    }

    fn enqueue<E: Event<S>>(&self, queue: QueueKind, event: E) {
        let core = self.lock.lock();

        let name = type_name::<E>();
        let entry = Pending::new(name, move |shared: &Self| shared.dispatch(&event));
        let pending = {
            let mut slot = core.slot.borrow_mut();
            slot.queues.push(queue, entry);
            slot.queues.len()
        };
        self.emit(TraceEvent::Enqueued {
            queue,
            event: name,
            pending,
        });
    }

    /// Run drain passes until one completes without a transition or post.
    fn drain(&self) {
        let core = self.lock.lock();

        loop {
            let working = core.slot.borrow_mut().queues.merge();
            if working == 0 {
                return;
            }
            self.emit(TraceEvent::DrainPass { working });

            let mut interrupted = false;
            loop {
                let Some(entry) = core.slot.borrow_mut().queues.pop_working() else {
                    break;
                };
                let event = entry.event();
                let outcome = entry.redispatch(self);

                let requeue = match outcome {
                    Outcome::DeferredEvent => Some(QueueKind::Deferred),
                    Outcome::PostedEvent => Some(QueueKind::Posted),
                    _ => None,
                };
                interrupted = outcome.interrupts_drain();

                match requeue {
                    Some(queue) => {
                        let pending = {
                            let mut slot = core.slot.borrow_mut();
                            slot.queues.push(queue, entry);
                            slot.queues.len()
                        };
                        self.emit(TraceEvent::Requeued {
                            queue,
                            event,
                            pending,
                        });
                    }
                    None => {
                        drop(entry);
                        let pending = core.slot.borrow().queues.len();
                        self.emit(TraceEvent::Dropped {
                            event,
                            outcome,
                            pending,
                        });
                    }
                }

                if interrupted {
                    break;
                }
            }

            if !interrupted {
                return;
            }
        }
    }

    pub(crate) fn current_state_name(&self) -> Option<&'static str> {
        let core = self.lock.lock();
        let active = core.slot.borrow().active;
        active
    }

    pub(crate) fn with_current_state<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.lend(|state, _| f(state)).map(|(result, _)| result)
    }

    pub(crate) fn with_domain<R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R, DomainError> {
        let core = self.lock.lock();
        let mut domain = core.domain.try_borrow_mut().map_err(|_| DomainError::Busy)?;
        Ok(f(&mut domain))
    }

    pub(crate) fn posted_len(&self) -> usize {
        let core = self.lock.lock();
        let len = core.slot.borrow().queues.posted_len();
        len
    }

    pub(crate) fn deferred_len(&self) -> usize {
        let core = self.lock.lock();
        let len = core.slot.borrow().queues.deferred_len();
        len
    }

    pub(crate) fn pending_len(&self) -> usize {
        let core = self.lock.lock();
        let len = core.slot.borrow().queues.len();
        len
    }
}
