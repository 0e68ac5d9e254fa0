use std::collections::{BTreeMap, HashMap, HashSet};

use derive_more::{Display, Error};
use itertools::Itertools;

use crate::clock::{Clock, DateTime};

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum PanelError {
    #[display("expected {expected} rows of {field} but found {found}")]
    RowCountMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[display("row {row} of {field} has {found} assets, expected {expected}")]
    ColumnCountMismatch {
        field: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("dates are neither ascending nor descending at position {pos}")]
    UnorderedDates { pos: usize },
    #[display("asset {symbol} appears more than once")]
    DuplicateAsset { symbol: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ordering {
    Ascending,
    Descending,
}

/// Time x field x asset container holding a close price and a liquidity flag for every date and
/// asset.
///
/// Rows are stored by date so that a view ending at position `t` is a prefix of the underlying
/// storage. Dates are always held in ascending order: raw loads that arrive newest-first are
/// flipped on construction.
#[derive(Clone, Debug)]
pub struct Panel {
    dates: Vec<DateTime>,
    assets: Vec<String>,
    close: Vec<Vec<Option<f64>>>,
    is_liquid: Vec<Vec<f64>>,
}

impl Panel {
    pub fn new(
        mut dates: Vec<DateTime>,
        assets: Vec<String>,
        mut close: Vec<Vec<Option<f64>>>,
        mut is_liquid: Vec<Vec<f64>>,
    ) -> Result<Self, PanelError> {
        Self::check_rows("close", dates.len(), close.iter().map(Vec::len), assets.len())?;
        Self::check_rows("is_liquid", dates.len(), is_liquid.iter().map(Vec::len), assets.len())?;

        let mut seen = HashSet::new();
        for symbol in &assets {
            if !seen.insert(symbol.as_str()) {
                return Err(PanelError::DuplicateAsset {
                    symbol: symbol.clone(),
                });
            }
        }

        if Self::ordering(&dates)? == Ordering::Descending {
            dates.reverse();
            close.reverse();
            is_liquid.reverse();
        }

        Ok(Self {
            dates,
            assets,
            close,
            is_liquid,
        })
    }

    fn check_rows(
        field: &'static str,
        expected_rows: usize,
        rows: impl ExactSizeIterator<Item = usize>,
        expected_assets: usize,
    ) -> Result<(), PanelError> {
        if rows.len() != expected_rows {
            return Err(PanelError::RowCountMismatch {
                field,
                expected: expected_rows,
                found: rows.len(),
            });
        }
        for (row, found) in rows.enumerate() {
            if found != expected_assets {
                return Err(PanelError::ColumnCountMismatch {
                    field,
                    row,
                    expected: expected_assets,
                    found,
                });
            }
        }
        Ok(())
    }

    fn ordering(dates: &[DateTime]) -> Result<Ordering, PanelError> {
        //A panel with fewer than two dates is trivially ascending
        let order = match (dates.first(), dates.get(1)) {
            (Some(first), Some(second)) if first > second => Ordering::Descending,
            _ => Ordering::Ascending,
        };

        for (pos, (prev, next)) in dates.iter().tuple_windows().enumerate() {
            let in_order = match order {
                Ordering::Ascending => prev < next,
                Ordering::Descending => prev > next,
            };
            if !in_order {
                return Err(PanelError::UnorderedDates { pos: pos + 1 });
            }
        }
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[DateTime] {
        &self.dates
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn asset_index(&self, symbol: &str) -> Option<usize> {
        self.assets.iter().position(|asset| asset == symbol)
    }

    pub fn clock(&self) -> Clock {
        Clock::new(self.dates.clone())
    }

    /// Returns a view over every date up to and including `pos`.
    pub fn view_to(&self, pos: usize) -> Option<PanelView<'_>> {
        if pos < self.dates.len() {
            Some(PanelView {
                panel: self,
                now: pos,
            })
        } else {
            None
        }
    }

    /// Returns a view ending at the last date on or before `date`.
    pub fn view_at(&self, date: DateTime) -> Option<PanelView<'_>> {
        let end = self.dates.partition_point(|d| *d <= date);
        end.checked_sub(1).and_then(|pos| self.view_to(pos))
    }

    pub fn latest(&self) -> Option<PanelView<'_>> {
        self.dates.len().checked_sub(1).and_then(|pos| self.view_to(pos))
    }
}

/// Read-only window onto a [Panel] that ends at the evaluation date.
///
/// Every accessor is bounded by `now`; asking for a later row returns nothing.
#[derive(Clone, Copy, Debug)]
pub struct PanelView<'a> {
    panel: &'a Panel,
    now: usize,
}

impl<'a> PanelView<'a> {
    /// Position of the evaluation date within the panel.
    pub fn now(&self) -> usize {
        self.now
    }

    pub fn date(&self) -> DateTime {
        self.panel.dates[self.now]
    }

    /// Number of dates visible, including `now`.
    pub fn steps(&self) -> usize {
        self.now + 1
    }

    pub fn assets(&self) -> &'a [String] {
        &self.panel.assets
    }

    pub fn close(&self, t: usize, asset: usize) -> Option<f64> {
        if t > self.now {
            return None;
        }
        self.panel.close.get(t)?.get(asset).copied().flatten()
    }

    pub fn is_liquid(&self, t: usize, asset: usize) -> bool {
        if t > self.now {
            return false;
        }
        self.panel
            .is_liquid
            .get(t)
            .and_then(|row| row.get(asset))
            .is_some_and(|flag| *flag > 0.0)
    }

    /// Simple return from `t - 1` to `t`, `None` where either close is missing, not positive or
    /// the result is not finite.
    pub fn ret(&self, t: usize, asset: usize) -> Option<f64> {
        let prev = self.close(t.checked_sub(1)?, asset).filter(|p| *p > 0.0)?;
        let curr = self.close(t, asset).filter(|p| *p > 0.0)?;
        let ret = (curr - prev) / prev;
        ret.is_finite().then_some(ret)
    }
}

/// Accumulates observations in any order and builds a [Panel].
///
/// Assets missing on a date have no close and are treated as illiquid.
pub struct PanelBuilder {
    inner: BTreeMap<DateTime, HashMap<String, (Option<f64>, f64)>>,
    assets: HashSet<String>,
}

impl PanelBuilder {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
            assets: HashSet::new(),
        }
    }

    fn entry(&mut self, date: DateTime, symbol: String) -> &mut (Option<f64>, f64) {
        self.assets.insert(symbol.clone());
        self.inner
            .entry(date)
            .or_default()
            .entry(symbol)
            .or_insert((None, 0.0))
    }

    pub fn add_close(
        &mut self,
        date: impl Into<DateTime>,
        symbol: impl Into<String>,
        close: f64,
    ) -> &mut Self {
        self.entry(date.into(), symbol.into()).0 = Some(close);
        self
    }

    pub fn add_liquidity(
        &mut self,
        date: impl Into<DateTime>,
        symbol: impl Into<String>,
        is_liquid: f64,
    ) -> &mut Self {
        self.entry(date.into(), symbol.into()).1 = is_liquid;
        self
    }

    pub fn add_row(
        &mut self,
        date: impl Into<DateTime>,
        symbol: impl Into<String>,
        close: Option<f64>,
        is_liquid: f64,
    ) -> &mut Self {
        *self.entry(date.into(), symbol.into()) = (close, is_liquid);
        self
    }

    pub fn build(&self) -> Result<Panel, PanelError> {
        let assets = self.assets.iter().cloned().sorted().collect_vec();
        let dates = self.inner.keys().copied().collect_vec();

        let mut close = Vec::with_capacity(dates.len());
        let mut is_liquid = Vec::with_capacity(dates.len());
        for row in self.inner.values() {
            let (close_row, liquid_row): (Vec<Option<f64>>, Vec<f64>) = assets
                .iter()
                .map(|symbol| row.get(symbol).copied().unwrap_or((None, 0.0)))
                .unzip();
            close.push(close_row);
            is_liquid.push(liquid_row);
        }

        Panel::new(dates, assets, close, is_liquid)
    }
}

impl Default for PanelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Panel, PanelBuilder, PanelError};
    use crate::clock::DateTime;

    fn dates(vals: &[i64]) -> Vec<DateTime> {
        vals.iter().map(|v| DateTime::from(*v)).collect()
    }

    #[test]
    fn test_that_descending_dates_are_flipped() {
        let panel = Panel::new(
            dates(&[103, 102, 101]),
            vec!["ABC".to_string()],
            vec![vec![Some(3.0)], vec![Some(2.0)], vec![Some(1.0)]],
            vec![vec![1.0], vec![1.0], vec![0.0]],
        )
        .unwrap();

        assert_eq!(panel.dates(), &dates(&[101, 102, 103])[..]);
        let view = panel.latest().unwrap();
        assert_eq!(view.close(0, 0), Some(1.0));
        assert_eq!(view.close(2, 0), Some(3.0));
        assert!(!view.is_liquid(0, 0));
        assert!(view.is_liquid(2, 0));
    }

    #[test]
    fn test_that_unordered_dates_are_rejected() {
        let res = Panel::new(
            dates(&[101, 103, 102]),
            vec!["ABC".to_string()],
            vec![vec![Some(1.0)]; 3],
            vec![vec![1.0]; 3],
        );
        assert_eq!(res.unwrap_err(), PanelError::UnorderedDates { pos: 2 });

        let dupes = Panel::new(
            dates(&[101, 101]),
            vec!["ABC".to_string()],
            vec![vec![Some(1.0)]; 2],
            vec![vec![1.0]; 2],
        );
        assert_eq!(dupes.unwrap_err(), PanelError::UnorderedDates { pos: 1 });
    }

    #[test]
    fn test_that_shape_mismatch_is_rejected() {
        let rows = Panel::new(
            dates(&[101, 102]),
            vec!["ABC".to_string()],
            vec![vec![Some(1.0)]],
            vec![vec![1.0]; 2],
        );
        assert!(matches!(
            rows.unwrap_err(),
            PanelError::RowCountMismatch { field: "close", .. }
        ));

        let cols = Panel::new(
            dates(&[101]),
            vec!["ABC".to_string(), "BCD".to_string()],
            vec![vec![Some(1.0), Some(2.0)]],
            vec![vec![1.0]],
        );
        assert!(matches!(
            cols.unwrap_err(),
            PanelError::ColumnCountMismatch {
                field: "is_liquid",
                row: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_that_view_hides_future_rows() {
        let mut builder = PanelBuilder::new();
        builder
            .add_row(100, "ABC", Some(10.0), 1.0)
            .add_row(101, "ABC", Some(11.0), 1.0)
            .add_row(102, "ABC", Some(12.0), 1.0);
        let panel = builder.build().unwrap();

        let view = panel.view_to(1).unwrap();
        assert_eq!(view.steps(), 2);
        assert_eq!(*view.date(), 101);
        assert_eq!(view.close(1, 0), Some(11.0));
        assert_eq!(view.close(2, 0), None);
        assert!(!view.is_liquid(2, 0));
        assert_eq!(view.ret(2, 0), None);
        assert!(panel.view_to(3).is_none());
    }

    #[test]
    fn test_that_view_at_picks_last_date_not_after() {
        let mut builder = PanelBuilder::new();
        builder
            .add_row(100, "ABC", Some(10.0), 1.0)
            .add_row(200, "ABC", Some(11.0), 1.0);
        let panel = builder.build().unwrap();

        assert!(panel.view_at(99.into()).is_none());
        assert_eq!(panel.view_at(150.into()).unwrap().now(), 0);
        assert_eq!(panel.view_at(200.into()).unwrap().now(), 1);
        assert_eq!(panel.view_at(500.into()).unwrap().now(), 1);
    }

    #[test]
    fn test_that_builder_fills_missing_assets() {
        let mut builder = PanelBuilder::new();
        builder
            .add_close(100, "BCD", 5.0)
            .add_liquidity(100, "BCD", 1.0)
            .add_close(101, "ABC", 10.0);
        let panel = builder.build().unwrap();

        assert_eq!(panel.assets(), &["ABC".to_string(), "BCD".to_string()]);
        let abc = panel.asset_index("ABC").unwrap();
        let bcd = panel.asset_index("BCD").unwrap();
        let view = panel.latest().unwrap();
        assert_eq!(view.close(0, abc), None);
        assert_eq!(view.close(1, abc), Some(10.0));
        assert!(view.is_liquid(0, bcd));
        assert!(!view.is_liquid(1, abc));
        assert!(panel.asset_index("XYZ").is_none());
    }

    #[test]
    fn test_that_returns_are_undefined_on_zero_price() {
        let mut builder = PanelBuilder::new();
        builder
            .add_row(100, "ABC", Some(0.0), 1.0)
            .add_row(101, "ABC", Some(10.0), 1.0)
            .add_row(102, "ABC", Some(11.0), 1.0);
        let panel = builder.build().unwrap();
        let view = panel.latest().unwrap();

        assert_eq!(view.ret(0, 0), None);
        assert_eq!(view.ret(1, 0), None);
        assert!((view.ret(2, 0).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_that_returns_are_undefined_on_negative_price() {
        let mut builder = PanelBuilder::new();
        builder
            .add_row(100, "ABC", Some(10.0), 1.0)
            .add_row(101, "ABC", Some(-5.0), 1.0)
            .add_row(102, "ABC", Some(10.0), 1.0)
            .add_row(103, "ABC", Some(12.0), 1.0);
        let panel = builder.build().unwrap();
        let view = panel.latest().unwrap();

        assert_eq!(view.ret(1, 0), None);
        assert_eq!(view.ret(2, 0), None);
        assert!((view.ret(3, 0).unwrap() - 0.2).abs() < 1e-12);
    }
}
