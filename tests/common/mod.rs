//! Scripted states shared by the integration tests.
//!
//! Every `Job` is answered from a per-id plan of steps; every dispatch and
//! every state drop is written to a journal so tests can check ordering.

#![allow(dead_code)]

use reactive_fsm::context::{Binding, Context, Enter};
use reactive_fsm::core::{Outcome, State};
use reactive_fsm::reactions;
use reactive_fsm::trace::NoopSink;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Job(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Alpha,
    Beta,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Discard,
    Defer,
    Ignore,
    Transit(Target),
    TransitPosting(Target),
    /// Post another job, then discard this one.
    Post(u32),
}

/// Carries a handle to its own engine so the reaction can call back into it.
pub struct Nested {
    pub engine: Engine,
    pub job: Job,
}

/// What a reaction observed when it called `process_event` on its engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reentry {
    pub outcome: Outcome,
    pub inspected: Option<String>,
    pub active: Option<&'static str>,
}

#[derive(Default)]
pub struct Script {
    plan: HashMap<u32, VecDeque<Step>>,
    pub journal: Vec<String>,
    pub reentries: Vec<Reentry>,
}

impl Script {
    fn next(&mut self, state: &str, id: u32) -> Step {
        self.journal.push(format!("{state}:{id}"));
        self.plan
            .get_mut(&id)
            .and_then(|steps| steps.pop_front())
            .unwrap_or(Step::Discard)
    }
}

pub trait Worker: State + Send {
    fn on_job(&mut self, _job: &Job) -> Outcome {
        Outcome::UnconsumedEvent
    }

    fn on_nested(&mut self, _nested: &Nested) -> Outcome {
        Outcome::UnconsumedEvent
    }
}

reactions! {
    dyn Worker {
        Job => on_job,
        Nested => on_nested,
    }
}

pub type Engine = Context<dyn Worker, Script>;

fn react(binding: &Binding<dyn Worker, Script>, job: &Job) -> Outcome {
    let name = binding.name();
    let Ok(step) = binding.with_domain(|script| script.next(name, job.0)) else {
        return Outcome::UnknownContext;
    };

    match step {
        Step::Discard => binding.discard_event(),
        Step::Defer => binding.defer_event(),
        Step::Ignore => Outcome::UnconsumedEvent,
        Step::Transit(Target::Alpha) => binding.transit::<Alpha>(),
        Step::Transit(Target::Beta) => binding.transit::<Beta>(),
        Step::TransitPosting(Target::Alpha) => binding.transit_posting::<Alpha>(),
        Step::TransitPosting(Target::Beta) => binding.transit_posting::<Beta>(),
        Step::Post(id) => {
            binding.post_event(Job(id));
            binding.discard_event()
        }
    }
}

fn reenter(binding: &Binding<dyn Worker, Script>, nested: &Nested) -> Outcome {
    let outcome = nested.engine.process_event(nested.job);
    let inspected = nested.engine.with_current_state(|s| s.name().to_string());
    let active = nested.engine.current_state_name();
    let _ = binding.with_domain(|script| {
        script.reentries.push(Reentry {
            outcome,
            inspected,
            active,
        })
    });
    binding.discard_event()
}

fn journal_drop(binding: &Binding<dyn Worker, Script>) {
    let name = binding.name();
    let _ = binding.with_domain(|script| script.journal.push(format!("drop {name}")));
}

pub struct Alpha {
    binding: Binding<dyn Worker, Script>,
}

pub struct Beta {
    binding: Binding<dyn Worker, Script>,
}

impl State for Alpha {
    fn name(&self) -> &str {
        self.binding.name()
    }
}

impl State for Beta {
    fn name(&self) -> &str {
        self.binding.name()
    }
}

impl Worker for Alpha {
    fn on_job(&mut self, job: &Job) -> Outcome {
        react(&self.binding, job)
    }

    fn on_nested(&mut self, nested: &Nested) -> Outcome {
        reenter(&self.binding, nested)
    }
}

impl Worker for Beta {
    fn on_job(&mut self, job: &Job) -> Outcome {
        react(&self.binding, job)
    }
}

impl Drop for Alpha {
    fn drop(&mut self) {
        journal_drop(&self.binding);
    }
}

impl Drop for Beta {
    fn drop(&mut self) {
        journal_drop(&self.binding);
    }
}

impl Enter<dyn Worker, Script> for Alpha {
    const NAME: &'static str = "Alpha";

    fn enter(binding: Binding<dyn Worker, Script>) -> Box<dyn Worker> {
        Box::new(Alpha { binding })
    }
}

impl Enter<dyn Worker, Script> for Beta {
    const NAME: &'static str = "Beta";

    fn enter(binding: Binding<dyn Worker, Script>) -> Box<dyn Worker> {
        Box::new(Beta { binding })
    }
}

pub fn engine() -> Engine {
    Context::with_sink(Script::default(), Arc::new(NoopSink))
}

pub fn plan(engine: &Engine, id: u32, steps: &[Step]) {
    engine
        .with_domain(|script| script.plan.insert(id, steps.iter().copied().collect()))
        .unwrap();
}

/// Journal entries that record dispatches (drops filtered out).
pub fn dispatches(engine: &Engine) -> Vec<String> {
    engine
        .with_domain(|script| {
            script
                .journal
                .iter()
                .filter(|line| !line.starts_with("drop "))
                .cloned()
                .collect()
        })
        .unwrap()
}

pub fn journal(engine: &Engine) -> Vec<String> {
    engine.with_domain(|script| script.journal.clone()).unwrap()
}

pub fn reentries(engine: &Engine) -> Vec<Reentry> {
    engine.with_domain(|script| script.reentries.clone()).unwrap()
}

pub fn clear_journal(engine: &Engine) {
    engine.with_domain(|script| script.journal.clear()).unwrap();
}
