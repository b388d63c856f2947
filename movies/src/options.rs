use std::collections::BTreeSet;

use datatable::SelectOption;

use crate::dataset::Movie;
use crate::format;

pub const RUNTIME_STEP: u32 = 30;
pub const REVENUE_STEP: u32 = 100;

/// Upper bound on the options a range select offers. Wider spreads widen the step.
pub const MAX_BUCKETS: u64 = 100;

/// Inclusive `[min, max]` bucket offered by the range select filters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
    pub min: u64,
    pub max: u64
}

impl Bucket {
    /// Encoded as the select value the range filters parse back.
    pub fn value(&self) -> String {
        format!("{},{}", self.min, self.max)
    }
}

/// Consecutive buckets from zero that cover `values`, skipping leading
/// buckets that end below the smallest value.
///
/// Buckets are `step` wide unless that would exceed [`MAX_BUCKETS`], in which
/// case the width grows to the smallest multiple of `step` that fits.
/// Non-finite values are ignored.
pub fn range_buckets(values: impl IntoIterator<Item=f64>, step: u32) -> Vec<Bucket> {
    let (min, max) = values.into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value)))
        })
        .unwrap_or((0.0, 0.0));

    if step == 0 {
        return vec![];
    }

    let step = u64::from(step);
    let top = max.clamp(0.0, u64::MAX as f64);
    let needed = (top / step as f64).ceil();
    let width = if needed > MAX_BUCKETS as f64 {
        let factor = (needed / MAX_BUCKETS as f64).ceil() as u64;
        log::debug!("widening range buckets from {step} by {factor} to cover {max}");
        step.saturating_mul(factor)
    } else {
        step
    };

    let count = ((top / width as f64).ceil() as u64).min(MAX_BUCKETS);
    (0..count)
        .map(|i| Bucket { min: i.saturating_mul(width), max: (i + 1).saturating_mul(width) })
        .filter(|bucket| min <= bucket.max as f64)
        .collect()
}

pub fn genres(movies: &[Movie]) -> Vec<SelectOption> {
    movies.iter()
        .flat_map(|movie| movie.genre.iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|genre| SelectOption::new(genre.as_str(), genre.as_str()))
        .collect()
}

pub fn years(movies: &[Movie]) -> Vec<SelectOption> {
    movies.iter()
        .map(|movie| movie.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|year| SelectOption::new(year.to_string(), year.to_string()))
        .collect()
}

pub fn ratings() -> Vec<SelectOption> {
    (1..=9).map(|r: u32| SelectOption::new(r.to_string(), r.to_string())).collect()
}

pub fn runtimes(movies: &[Movie]) -> Vec<SelectOption> {
    range_buckets(movies.iter().map(|movie| movie.runtime as f64), RUNTIME_STEP)
        .into_iter()
        .map(|bucket| {
            let text = format!("{} to {}", format::runtime(bucket.min), format::runtime(bucket.max));
            SelectOption::new(text, bucket.value())
        })
        .collect()
}

pub fn revenues(movies: &[Movie]) -> Vec<SelectOption> {
    range_buckets(movies.iter().map(|movie| movie.revenue), REVENUE_STEP)
        .into_iter()
        .map(|bucket| SelectOption::new(format!("{} to {}", bucket.min, bucket.max), bucket.value()))
        .collect()
}
