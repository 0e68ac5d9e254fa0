use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::panel::PanelView;
use crate::strategy::WeightStrategy;
use crate::types::WeightVector;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Number of trailing daily returns averaged into the signal.
    pub window: usize,
}

impl MomentumConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            window: MomentumNeutral::DEFAULT_WINDOW,
        }
    }
}

///Long/short momentum strategy that is neutral across the liquid universe.
///
///At each date the signal for an asset is its average simple return over the trailing window.
///Signals are demeaned across liquid assets and scaled so that absolute weights sum to one. Assets
///that are illiquid on the evaluation date, or that lack a full window of returns, are excluded
///from the cross-section and always get a zero weight.
///
///Every degenerate case (short history, no liquid assets, signals that cancel exactly, bad prices)
///resolves to a zero weight rather than an error.
#[derive(Clone, Debug, Default)]
pub struct MomentumNeutral {
    config: MomentumConfig,
}

impl MomentumNeutral {
    pub const DEFAULT_WINDOW: usize = 100;

    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    pub fn window(&self) -> usize {
        self.config.window
    }

    /// Trailing mean of simple returns ending at `now`. `None` until `window` returns are
    /// available and whenever one of them is undefined.
    pub fn signal(&self, view: &PanelView, asset: usize) -> Option<f64> {
        let window = self.config.window;
        let now = view.now();
        //Need window + 1 closes to get window returns
        if window == 0 || now < window {
            return None;
        }

        let mut sum = 0.0;
        for t in (now + 1 - window)..=now {
            sum += view.ret(t, asset)?;
        }
        let avg = sum / window as f64;
        avg.is_finite().then_some(avg)
    }
}

impl WeightStrategy for MomentumNeutral {
    fn weights(&self, view: &PanelView) -> WeightVector {
        let now = view.now();
        let date = view.date();
        let count = view.assets().len();

        let signals: Vec<Option<f64>> = (0..count)
            .map(|asset| {
                if view.is_liquid(now, asset) {
                    self.signal(view, asset)
                } else {
                    None
                }
            })
            .collect();

        let eligible = signals.iter().flatten().count();
        if eligible == 0 {
            debug!("STRATEGY: No eligible assets on {}", date);
            return WeightVector::zeros(date, count);
        }
        let mean = signals.iter().flatten().sum::<f64>() / eligible as f64;

        let mut weights: Vec<f64> = signals
            .iter()
            .enumerate()
            .map(|(asset, signal)| match signal {
                Some(value) if view.is_liquid(now, asset) => value - mean,
                _ => 0.0,
            })
            .collect();

        let gross: f64 = weights.iter().map(|w| w.abs()).sum();
        if gross == 0.0 || !gross.is_finite() {
            debug!("STRATEGY: Signals cancel on {}, holding no position", date);
            return WeightVector::zeros(date, count);
        }

        for weight in weights.iter_mut() {
            *weight /= gross;
            if !weight.is_finite() {
                *weight = 0.0;
            }
        }
        WeightVector::new(date, weights)
    }

    fn warmup(&self) -> usize {
        self.config.window
    }
}
