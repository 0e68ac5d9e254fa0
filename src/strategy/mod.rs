//! Strategy is responsible for turning price history into target weights. Execution, costs and
//! performance are left to whatever consumes the weights.
//!
//! Strategies receive a [PanelView](crate::input::panel::PanelView) that ends at the evaluation
//! date and return weights for that date only. A strategy has no way to read a later row, so a
//! walk-forward driver can call it at every date without introducing lookahead bias.

pub mod momentum;

use crate::input::panel::PanelView;
use crate::types::WeightVector;

pub trait WeightStrategy {
    /// Target weights for the last date in `view`.
    fn weights(&self, view: &PanelView) -> WeightVector;

    /// Number of leading dates for which the strategy can only return zeros.
    fn warmup(&self) -> usize {
        0
    }
}
