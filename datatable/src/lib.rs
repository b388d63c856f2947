mod value;
mod definition;
mod error;
mod state;
mod head;
mod body;
mod reveal;
mod table;

pub use value::Value;
pub use definition::{Accessor, Column, Filter, FilterInput, SelectOption, Sort, SortDirection, TableDefinition, TableDefinitionBuilder, Transform};
pub use error::{BindingKind, ConfigurationError};
pub use state::{FilterState, SortState};
pub use head::{FilterCell, HeadEvent, HeaderCell, TableHead};
pub use body::TableBody;
pub use reveal::{Debouncer, RevealConfig, RevealWindow, DEFAULT_DEBOUNCE};
pub use table::{derive_visible, DataTable};
