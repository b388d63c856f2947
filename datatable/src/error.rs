use crate::definition::Accessor;

/// What kind of per-column binding a definition refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BindingKind {
    Transform,
    Filter,
    Sort
}

impl BindingKind {
    pub fn name(&self) -> &'static str {
        match self {
            BindingKind::Transform => "transform",
            BindingKind::Filter => "filter",
            BindingKind::Sort => "sort"
        }
    }
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised while building a [`TableDefinition`](crate::TableDefinition).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("table declares no columns")]
    NoColumns,

    #[error("column `{0}` is declared more than once")]
    DuplicateColumn(Accessor),

    #[error("more than one {kind} is bound to `{accessor}`")]
    DuplicateBinding { kind: BindingKind, accessor: Accessor },

    #[error("{kind} bound to `{accessor}` has no matching column")]
    UnknownAccessor { kind: BindingKind, accessor: Accessor },
}
