//! Walk-forward driver that evaluates a strategy at every date of a panel.
//!
//! The runner owns the clock. At each tick the strategy is handed a view that ends at the clock's
//! current position, so weights for date `t` are only ever computed from rows `0..=t`. Nothing
//! here calculates returns or performance, the output series is meant to be handed to whatever
//! scores it.

use log::{debug, info, warn};

use crate::input::panel::Panel;
use crate::strategy::WeightStrategy;
use crate::types::{WeightSeries, WeightVector};

pub struct WalkForward<S: WeightStrategy> {
    strategy: S,
}

impl<S: WeightStrategy> WalkForward<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Weights for a single date, `None` if `pos` is past the end of the panel.
    pub fn step(&self, panel: &Panel, pos: usize) -> Option<WeightVector> {
        let view = panel.view_to(pos)?;
        Some(self.strategy.weights(&view))
    }

    pub fn run(&self, panel: &Panel) -> WeightSeries {
        let mut series = WeightSeries::new(panel.assets().to_vec());
        let mut clock = panel.clock();
        if clock.is_empty() {
            warn!("RUNNER: Panel has no dates, nothing to run");
            return series;
        }

        info!(
            "RUNNER: Starting walk-forward over {} dates, first {} are warm-up",
            clock.len(),
            self.strategy.warmup()
        );

        loop {
            if let Some(weights) = self.step(panel, clock.pos()) {
                debug!(
                    "RUNNER: {} gross {:.4} net {:.4}",
                    weights.date,
                    weights.gross(),
                    weights.net()
                );
                series.push(weights);
            }
            if !clock.tick() {
                break;
            }
        }

        info!("RUNNER: Completed walk-forward with {} steps", series.len());
        series
    }
}
