//! Defines types that are used by multiple components.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::clock::DateTime;

///Target allocation for a single date. One weight per panel asset, held in the same order as the
///panel's assets. Positive is long, negative is short.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WeightVector {
    pub date: DateTime,
    pub weights: Vec<f64>,
}

impl WeightVector {
    pub fn new(date: impl Into<DateTime>, weights: Vec<f64>) -> Self {
        Self {
            date: date.into(),
            weights,
        }
    }

    pub fn zeros(date: impl Into<DateTime>, assets: usize) -> Self {
        Self::new(date, vec![0.0; assets])
    }

    pub fn get(&self, asset: usize) -> Option<f64> {
        self.weights.get(asset).copied()
    }

    /// Sum of absolute weights, one when fully invested and zero when flat.
    pub fn gross(&self) -> f64 {
        self.weights.iter().map(|w| w.abs()).sum()
    }

    /// Sum of signed weights, close to zero for a neutral book.
    pub fn net(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn is_flat(&self) -> bool {
        self.weights.iter().all(|w| *w == 0.0)
    }
}

///Flattened view of a weight, used when writing the series out row by row.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WeightRecord {
    pub date: DateTime,
    pub symbol: String,
    pub weight: f64,
}

///Time-ordered weights produced by a walk-forward run.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WeightSeries {
    assets: Vec<String>,
    steps: Vec<WeightVector>,
}

impl WeightSeries {
    pub fn new(assets: Vec<String>) -> Self {
        Self {
            assets,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, weights: WeightVector) {
        self.steps.push(weights);
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&WeightVector> {
        self.steps.get(pos)
    }

    pub fn last(&self) -> Option<&WeightVector> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightVector> {
        self.steps.iter()
    }

    /// Drops the first `steps` entries, which were produced before the strategy had enough
    /// history to emit anything but zeros.
    pub fn without_warmup(&self, steps: usize) -> Self {
        Self {
            assets: self.assets.clone(),
            steps: self.steps.iter().skip(steps).cloned().collect(),
        }
    }

    pub fn records(&self) -> Vec<WeightRecord> {
        let mut res = Vec::with_capacity(self.steps.len() * self.assets.len());
        for step in &self.steps {
            for (symbol, weight) in self.assets.iter().zip(step.weights.iter()) {
                res.push(WeightRecord {
                    date: step.date,
                    symbol: symbol.clone(),
                    weight: *weight,
                });
            }
        }
        res
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for record in self.records() {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes records as csv when the path has a `csv` extension, in any case, and JSON otherwise.
    pub fn write_path(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
        let writer = BufWriter::new(file);
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            self.write_csv(writer)
        } else {
            self.write_json(writer)
        }
    }
}
