use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use serde::Deserialize;

use crate::clock::DateTime;
use crate::input::panel::{Panel, PanelBuilder};

/*
 * Long format, one row per date and asset:
 * date,symbol,close,is_liquid
 * 2021-09-30,ABC,101.5,1
 * 2021-09-30,BCD,,0
 *
 * date is either an epoch integer or YYYY-MM-DD. An empty close is a missing price and an empty
 * is_liquid is treated as not tradable. Rows can be in any order but each date and symbol pair
 * appears once.
 */
#[derive(Debug, Deserialize)]
struct Row {
    date: String,
    symbol: String,
    close: Option<f64>,
    is_liquid: Option<f64>,
}

pub fn from_reader<R: Read>(reader: R) -> Result<Panel> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = PanelBuilder::new();
    let mut seen: HashSet<(DateTime, String)> = HashSet::new();
    let mut count = 0;
    for result in rdr.deserialize() {
        let row: Row = result.with_context(|| format!("Malformed row {}", count + 1))?;
        let date = DateTime::parse(&row.date)
            .with_context(|| format!("Invalid date {} on row {}", row.date, count + 1))?;
        if !seen.insert((date, row.symbol.clone())) {
            bail!(
                "Duplicate {} on {} at row {}",
                row.symbol,
                row.date,
                count + 1
            );
        }
        builder.add_row(date, row.symbol, row.close, row.is_liquid.unwrap_or(0.0));
        count += 1;
    }

    let panel = builder.build()?;
    info!(
        "SOURCE: Loaded {} rows into panel with {} dates and {} assets",
        count,
        panel.len(),
        panel.assets().len()
    );
    Ok(panel)
}

pub fn from_path(path: &Path) -> Result<Panel> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    from_reader(file)
}
