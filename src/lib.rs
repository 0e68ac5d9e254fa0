//! # What is Themis?
//!
//! Themis builds market-neutral momentum portfolios from daily price data. Given a panel of close
//! prices and liquidity flags for a universe of assets, it produces long/short weights for each
//! date that sum to zero across the liquid universe and whose absolute values sum to one.
//!
//! Themis does not fetch data, execute trades or score performance. It sits between a data
//! source and whatever consumes the weights (a backtest exchange, a statistics package, a file
//! for submission).
//!
//! # Implementation
//!
//! - An input, [Panel](crate::input::panel::Panel), holds close and liquidity by date and asset.
//! Panels are built from a [source](crate::source) or with
//! [PanelBuilder](crate::input::panel::PanelBuilder).
//! - A strategy implements [WeightStrategy](crate::strategy::WeightStrategy).
//! [MomentumNeutral](crate::strategy::momentum::MomentumNeutral) averages each asset's simple
//! returns over a trailing window (100 days by default), demeans the averages across liquid
//! assets and scales the result to unit gross exposure.
//! - [WalkForward](crate::runner::WalkForward) calls the strategy once per date and collects a
//! [WeightSeries](crate::types::WeightSeries) that can be written as JSON or CSV.
//!
//! # Lookahead
//!
//! Some libraries hand strategies the full dataset and trust them to index it correctly. Themis
//! does not: strategies are given a [PanelView](crate::input::panel::PanelView) that ends at the
//! evaluation date and every accessor on the view returns nothing for later rows. Weights for a
//! date are therefore identical whatever happens in the data afterwards.
//!
//! # Degenerate inputs
//!
//! The weight calculation has no error path. Short history, no liquid assets, signals that cancel
//! exactly and bad prices all resolve to a weight of zero for the affected assets (or for the
//! whole date). Errors are only returned when loading or constructing a panel.
//!
//! ``
//! RUST_LOG=info cargo run --bin themis prices.csv weights.csv
//! ``
pub mod clock;
pub mod input;
pub mod runner;
pub mod source;
pub mod strategy;
pub mod types;
