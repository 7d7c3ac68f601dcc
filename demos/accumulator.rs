//! Accumulator
//!
//! Two states take turns driving a shared accumulator: `Adding` applies an
//! `Add` and hands over to `Subtracting`, which applies a `Subtract` and
//! hands back. Each state discards the operation meant for the other one.
//!
//! Key concepts:
//! - One trait method per event, defaulting to unconsumed
//! - Transitions requested from inside a reaction
//! - Domain data owned by the engine and reached through the binding
//!
//! Run with: cargo run --example accumulator
//! Set RUST_LOG=reactive_fsm=trace to see the engine's queue decisions.

use reactive_fsm::context::{Binding, Enter};
use reactive_fsm::core::{Outcome, State};
use reactive_fsm::{reactions, ContextBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
struct Add(i64);

#[derive(Debug)]
struct Subtract(i64);

trait Arith: State + Send {
    fn on_add(&mut self, _ev: &Add) -> Outcome {
        Outcome::UnconsumedEvent
    }

    fn on_subtract(&mut self, _ev: &Subtract) -> Outcome {
        Outcome::UnconsumedEvent
    }
}

reactions! {
    dyn Arith {
        Add => on_add,
        Subtract => on_subtract,
    }
}

struct Adding {
    binding: Binding<dyn Arith, i64>,
}

struct Subtracting {
    binding: Binding<dyn Arith, i64>,
}

impl State for Adding {
    fn name(&self) -> &str {
        self.binding.name()
    }
}

impl State for Subtracting {
    fn name(&self) -> &str {
        self.binding.name()
    }
}

impl Arith for Adding {
    fn on_add(&mut self, ev: &Add) -> Outcome {
        let _ = self.binding.with_domain(|total| *total += ev.0);
        self.binding.transit::<Subtracting>()
    }

    fn on_subtract(&mut self, _ev: &Subtract) -> Outcome {
        self.binding.discard_event()
    }
}

impl Arith for Subtracting {
    fn on_add(&mut self, _ev: &Add) -> Outcome {
        self.binding.discard_event()
    }

    fn on_subtract(&mut self, ev: &Subtract) -> Outcome {
        let _ = self.binding.with_domain(|total| *total -= ev.0);
        self.binding.transit::<Adding>()
    }
}

impl Enter<dyn Arith, i64> for Adding {
    const NAME: &'static str = "Adding";

    fn enter(binding: Binding<dyn Arith, i64>) -> Box<dyn Arith> {
        Box::new(Adding { binding })
    }
}

impl Enter<dyn Arith, i64> for Subtracting {
    const NAME: &'static str = "Subtracting";

    fn enter(binding: Binding<dyn Arith, i64>) -> Box<dyn Arith> {
        Box::new(Subtracting { binding })
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reactive_fsm=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== Accumulator Example ===\n");

    let calculator = ContextBuilder::<dyn Arith, i64>::new()
        .domain(0)
        .initial::<Adding>()
        .build()
        .unwrap();

    let report = |label: &str, outcome: Outcome| {
        let total = calculator.with_domain(|total| *total).unwrap_or_default();
        let state = calculator.current_state_name().unwrap_or("-");
        let outcome = outcome.to_string();
        println!("{label:<12} -> {outcome:<24} total = {total:>4}  state = {state}");
    };

    report("add 10", calculator.process_event(Add(10)));
    report("subtract 20", calculator.process_event(Subtract(20)));
    report("add 30", calculator.process_event(Add(30)));
    report("add 30", calculator.process_event(Add(30)));
    report("subtract 40", calculator.process_event(Subtract(40)));
    report("subtract 40", calculator.process_event(Subtract(40)));

    println!("\n=== Example Complete ===");
}
