use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use crate::clock::DateTime;
use crate::input::panel::{Panel, PanelError};

const SECS_IN_DAY: i64 = 86_400;
//2021-01-01 09:00 UTC
const START_DATE: i64 = 1_609_491_600;

/// Daily random-walk panel, every asset liquid on every date. Seeded so that runs are repeatable.
pub fn random_panel(length: usize, symbols: &[&str], seed: u64) -> Result<Panel, PanelError> {
    let ret_dist = Uniform::new(-0.02, 0.02);
    let start_dist = Uniform::new(90.0, 100.0);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut prices: Vec<f64> = symbols.iter().map(|_| start_dist.sample(&mut rng)).collect();

    let mut dates = Vec::with_capacity(length);
    let mut close: Vec<Vec<Option<f64>>> = Vec::with_capacity(length);
    let mut is_liquid = Vec::with_capacity(length);
    for day in 0..length {
        dates.push(DateTime::from(START_DATE + day as i64 * SECS_IN_DAY));
        close.push(prices.iter().map(|p| Some(*p)).collect());
        is_liquid.push(vec![1.0; symbols.len()]);

        for price in prices.iter_mut() {
            *price *= 1.0 + ret_dist.sample(&mut rng);
        }
    }

    let assets = symbols.iter().map(|s| s.to_string()).collect();
    Panel::new(dates, assets, close, is_liquid)
}
