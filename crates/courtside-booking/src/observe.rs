//! # Step Observation
//!
//! Wraps each booking step with before/after effects.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  instrument(hook, Charge, || processor.charge(total))                   │
//! │                                                                         │
//! │    hook.before(Charge)          ── e.g. "charge started"                │
//! │    start = Instant::now()                                               │
//! │    op()                         ── the real work                        │
//! │    hook.after(Charge, elapsed, Succeeded | Failed)                      │
//! │                                 ── e.g. "charge finished in 0.04 ms"    │
//! │                                                                         │
//! │  HookStack runs several hooks around the same step, outermost first on  │
//! │  the way in and last on the way out.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestrator also reports every state-machine transition through
//! [`StepHook::transition`].

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::orchestrator::BookingStage;

/// A unit of work inside one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Validate,
    CheckInventory,
    Price,
    Charge,
    Reserve,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStep::Validate => "validate",
            BookingStep::CheckInventory => "check_inventory",
            BookingStep::Price => "price",
            BookingStep::Charge => "charge",
            BookingStep::Reserve => "reserve",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

/// Cross-cutting behavior around booking steps. Every method defaults to
/// doing nothing.
pub trait StepHook: Send + Sync {
    fn before(&self, _step: BookingStep) {}

    fn after(&self, _step: BookingStep, _elapsed: Duration, _outcome: StepOutcome) {}

    fn transition(&self, _from: BookingStage, _to: BookingStage) {}
}

/// Runs `op` between `hook.before` and `hook.after`.
pub fn instrument<T, E>(
    hook: &dyn StepHook,
    step: BookingStep,
    op: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    hook.before(step);
    let start = Instant::now();
    let result = op();
    let outcome = if result.is_ok() {
        StepOutcome::Succeeded
    } else {
        StepOutcome::Failed
    };
    hook.after(step, start.elapsed(), outcome);
    result
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl StepHook for NoopHook {}

/// Logs each step and its duration through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl StepHook for TracingHook {
    fn before(&self, step: BookingStep) {
        debug!(%step, "Step started");
    }

    fn after(&self, step: BookingStep, elapsed: Duration, outcome: StepOutcome) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        match outcome {
            StepOutcome::Succeeded => debug!(%step, elapsed_ms, "Step finished"),
            StepOutcome::Failed => warn!(%step, elapsed_ms, "Step failed"),
        }
    }

    fn transition(&self, from: BookingStage, to: BookingStage) {
        debug!(?from, ?to, "Booking stage changed");
    }
}

/// Several hooks applied around the same steps.
#[derive(Clone, Default)]
pub struct HookStack {
    hooks: Vec<Arc<dyn StepHook>>,
}

impl HookStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hook` inside the ones already pushed.
    pub fn push(mut self, hook: Arc<dyn StepHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookStack")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl StepHook for HookStack {
    fn before(&self, step: BookingStep) {
        for hook in &self.hooks {
            hook.before(step);
        }
    }

    fn after(&self, step: BookingStep, elapsed: Duration, outcome: StepOutcome) {
        for hook in self.hooks.iter().rev() {
            hook.after(step, elapsed, outcome);
        }
    }

    fn transition(&self, from: BookingStage, to: BookingStage) {
        for hook in &self.hooks {
            hook.transition(from, to);
        }
    }
}
