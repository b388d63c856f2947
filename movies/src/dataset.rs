use std::io::Read;
use std::str::FromStr;

use serde::Deserialize;
use smallvec::SmallVec;

const BUNDLED: &str = include_str!("../data/movies.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{title}` has an invalid {field}: {value:?}")]
    InvalidNumber {
        title: String,
        field: &'static str,
        value: String
    },
}

pub type Genres = SmallVec<[String; 3]>;

/// A record exactly as it appears in the dataset file; numbers arrive as text.
#[derive(Deserialize, Clone, Debug)]
pub struct RawMovie {
    pub rank: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub genre: Genres,
    pub year: String,
    pub runtime: String,
    pub rating: String,
    pub votes: String,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub metascore: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub rank: u32,
    pub title: String,
    pub description: String,
    pub director: String,
    pub actors: Vec<String>,
    pub genre: Genres,
    pub year: u32,
    /// Minutes.
    pub runtime: u32,
    /// Out of ten.
    pub rating: f64,
    pub votes: u64,
    /// Millions of dollars; 0 when unknown.
    pub revenue: f64,
    pub metascore: Option<u32>,
}

fn parse_field<T: FromStr>(title: &str, field: &'static str, value: &str) -> Result<T, DatasetError> {
    value.trim().parse::<T>().map_err(|_| DatasetError::InvalidNumber {
        title: title.to_string(),
        field,
        value: value.to_string()
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TryFrom<RawMovie> for Movie {
    type Error = DatasetError;

    fn try_from(raw: RawMovie) -> Result<Self, Self::Error> {
        let title = raw.title.as_str();
        let movie = Movie {
            rank: parse_field(title, "rank", &raw.rank)?,
            year: parse_field(title, "year", &raw.year)?,
            runtime: parse_field(title, "runtime", &raw.runtime)?,
            rating: parse_field(title, "rating", &raw.rating)?,
            votes: parse_field(title, "votes", &raw.votes)?,
            revenue: non_empty(&raw.revenue).map_or(Ok(0.0), |value| parse_field(title, "revenue", value))?,
            metascore: non_empty(&raw.metascore).map(|value| parse_field(title, "metascore", value)).transpose()?,
            title: raw.title,
            description: raw.description,
            director: raw.director,
            actors: raw.actors,
            genre: raw.genre,
        };
        Ok(movie)
    }
}

pub fn load_from_str(json: &str) -> Result<Vec<Movie>, DatasetError> {
    let raw: Vec<RawMovie> = serde_json::from_str(json)?;
    into_movies(raw)
}

pub fn load_from_reader(reader: impl Read) -> Result<Vec<Movie>, DatasetError> {
    let raw: Vec<RawMovie> = serde_json::from_reader(reader)?;
    into_movies(raw)
}

/// The dataset shipped with the application.
pub fn bundled() -> Result<Vec<Movie>, DatasetError> {
    load_from_str(BUNDLED)
}

fn into_movies(raw: Vec<RawMovie>) -> Result<Vec<Movie>, DatasetError> {
    let movies = raw.into_iter().map(Movie::try_from).collect::<Result<Vec<_>, _>>()?;
    log::info!("loaded {} movies", movies.len());
    Ok(movies)
}
