mod dataset;
pub mod format;
pub mod options;
mod table;

pub use dataset::{bundled, load_from_reader, load_from_str, DatasetError, Genres, Movie, RawMovie};
pub use table::{definition, GENRE, RATING, REVENUE, RUNTIME, TITLE, YEAR};
