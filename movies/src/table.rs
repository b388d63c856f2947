use std::cmp::Ordering;

use datatable::{Accessor, Column, ConfigurationError, Filter, FilterInput, Sort, TableDefinition, Transform, Value};

use crate::dataset::Movie;
use crate::{format, options};

pub const TITLE: Accessor = Accessor::new("title");
pub const YEAR: Accessor = Accessor::new("year");
pub const RUNTIME: Accessor = Accessor::new("runtime");
pub const REVENUE: Accessor = Accessor::new("revenue");
pub const RATING: Accessor = Accessor::new("rating");
pub const GENRE: Accessor = Accessor::new("genre");

fn parse_range(input: &str) -> Option<(Value, Value)> {
    let (min, max) = input.split_once(',')?;
    let min = min.trim().parse::<f64>().ok()?;
    let max = max.trim().parse::<f64>().ok()?;
    Some((Value::Float(min), Value::Float(max)))
}

fn in_range(value: f64, input: &str) -> bool {
    match parse_range(input) {
        Some((min, max)) => Value::Float(value).in_bounds(min..=max),
        None => false
    }
}

fn above_rating(movie: &Movie, input: &str) -> bool {
    match input.trim().parse::<f64>() {
        Ok(min) => movie.rating > min.trunc(),
        Err(_) => false
    }
}

fn compare_titles(a: &Movie, b: &Movie) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Movies table: columns, display transforms, filter inputs and sorts.
///
/// Select options for the genre, year and range filters are computed from
/// `movies`, which should be the full dataset rather than a filtered view.
pub fn definition(movies: &[Movie]) -> Result<TableDefinition<Movie>, ConfigurationError> {
    TableDefinition::builder()
        .column(Column::new(TITLE, "Title", |m: &Movie| m.title.as_str().into()))
        .column(Column::new(YEAR, "Year", |m: &Movie| m.year.into()))
        .column(Column::new(RUNTIME, "Runtime", |m: &Movie| m.runtime.into()))
        .column(Column::new(REVENUE, "Revenue", |m: &Movie| m.revenue.into()))
        .column(Column::new(RATING, "Rating", |m: &Movie| m.rating.into()))
        .column(Column::new(GENRE, "Genres", |m: &Movie| Value::List(m.genre.to_vec())))

        .transform(Transform::new(RATING, |v| format::rating(v.as_float().unwrap_or(0.0))))
        .transform(Transform::new(REVENUE, |v| format::revenue(v.as_float().unwrap_or(0.0))))
        .transform(Transform::new(RUNTIME, |v| format::runtime(v.as_integer().unwrap_or(0).max(0) as u64)))
        .transform(Transform::new(GENRE, |v| v.as_list().map(format::genres).unwrap_or_default()))

        .filter(Filter::new(TITLE, FilterInput::text("Filter by title"), |m: &Movie, input| {
            m.title.to_lowercase().contains(&input.to_lowercase())
        }))
        .filter(Filter::new(GENRE, FilterInput::select("Filter by genre", options::genres(movies)), |m: &Movie, input| {
            m.genre.iter().any(|genre| genre == input)
        }))
        .filter(Filter::new(YEAR, FilterInput::select("Filter by year", options::years(movies)), |m: &Movie, input| {
            m.year.to_string() == input
        }))
        .filter(Filter::new(RATING, FilterInput::select("Above", options::ratings()), above_rating))
        .filter(Filter::new(RUNTIME, FilterInput::select("Filter by runtime", options::runtimes(movies)), |m: &Movie, input| {
            in_range(m.runtime as f64, input)
        }))
        .filter(Filter::new(REVENUE, FilterInput::select("Filter by revenue", options::revenues(movies)), |m: &Movie, input| {
            in_range(m.revenue, input)
        }))

        .sort(Sort::by(TITLE, compare_titles))
        .sort(Sort::by_key(YEAR, |m: &Movie| m.year))
        .sort(Sort::by_key(RUNTIME, |m: &Movie| m.runtime))
        .sort(Sort::by(REVENUE, |a: &Movie, b: &Movie| a.revenue.total_cmp(&b.revenue)))
        .sort(Sort::by(RATING, |a: &Movie, b: &Movie| a.rating.total_cmp(&b.rating)))
        .build()
}
