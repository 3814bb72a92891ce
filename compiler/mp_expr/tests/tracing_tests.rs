//! Logging behaviour of the factory and builders.
//!
//! A counting layer records every event the factory emits while a scoped
//! subscriber is installed.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mp_expr::{ExprError, ExprFactory, Kind, Operand};
use pretty_assertions::assert_eq;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

#[derive(Clone, Default)]
struct EventCounts {
    trace: Arc<AtomicUsize>,
    debug: Arc<AtomicUsize>,
}

impl EventCounts {
    fn trace(&self) -> usize {
        self.trace.load(Ordering::Relaxed)
    }

    fn debug(&self) -> usize {
        self.debug.load(Ordering::Relaxed)
    }
}

impl<S: Subscriber> Layer<S> for EventCounts {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let counter = match *event.metadata().level() {
            Level::TRACE => &self.trace,
            Level::DEBUG => &self.debug,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn with_counts(f: impl FnOnce()) -> EventCounts {
    let counts = EventCounts::default();
    let subscriber = tracing_subscriber::registry().with(counts.clone());
    tracing::subscriber::with_default(subscriber, f);
    counts
}

#[test]
fn test_init_tracing_is_idempotent() {
    mp_expr::init_tracing();
    mp_expr::init_tracing();

    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    assert_eq!(x.index(factory.arena()), 0);
}

#[test]
fn test_every_allocation_is_traced() {
    let counts = with_counts(|| {
        let mut factory = ExprFactory::new();
        let x = factory.make_variable(0);
        let one = factory.make_numeric_constant(1.0);
        factory.make_binary(Kind::Add, x, one).unwrap();
        factory.add_function("f");
    });
    assert_eq!(counts.trace(), 4);
    assert_eq!(counts.debug(), 0);
}

#[test]
fn test_finished_builders_are_logged() {
    let counts = with_counts(|| {
        let mut factory = ExprFactory::new();
        let x = factory.make_variable(0);
        let mut builder = factory.begin_sum(1).unwrap();
        builder.add_arg(x).unwrap();
        factory.end_sum(builder).unwrap();

        let mut builder = factory.begin_pl_term(1).unwrap();
        builder.add_slope(-1.0).unwrap();
        builder.add_breakpoint(0.0).unwrap();
        builder.add_slope(1.0).unwrap();
        factory.end_pl_term(builder, x).unwrap();
    });
    // variable, sum, PL term
    assert_eq!(counts.trace(), 3);
    assert_eq!(counts.debug(), 2);
}

#[test]
fn test_rejected_builder_is_logged() {
    let counts = with_counts(|| {
        let mut factory = ExprFactory::new();
        let builder = factory.begin_vararg(Kind::Max, 2).unwrap();
        assert_eq!(
            factory.end_vararg(builder).unwrap_err(),
            ExprError::BuilderUnderflow(Operand::Argument)
        );
    });
    assert_eq!(counts.trace(), 0);
    assert_eq!(counts.debug(), 1);
}
