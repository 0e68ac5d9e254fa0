//! Inputs wrap around a dataset providing a simple transparent interface that strategies build
//! their operations around.
//!
//! Strategies never see a [Panel](crate::input::panel::Panel) directly. They are handed a
//! [PanelView](crate::input::panel::PanelView) that ends at the evaluation date, so data after
//! "now" cannot be read by construction. Sources should produce panels so that clients do not have
//! to marshall data into internal types.
pub mod panel;
