use crate::definition::{Accessor, AccessorMap, SortDirection, TableDefinition};

/// Active filter input per filterable column. `None` means inactive.
#[derive(Clone, Debug, Default)]
pub struct FilterState {
    inputs: AccessorMap<Option<String>>
}

impl FilterState {
    pub fn new<Item>(definition: &TableDefinition<Item>) -> FilterState {
        FilterState {
            inputs: definition.filters().map(|filter| (filter.accessor.clone(), None)).collect()
        }
    }

    /// Stores the raw input, or marks the column inactive when the input is blank.
    /// Returns `false` for columns that have no filter.
    pub fn set(&mut self, accessor: &Accessor, input: Option<&str>) -> bool {
        let Some(slot) = self.inputs.get_mut(accessor) else { return false; };
        *slot = input
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string);
        true
    }

    pub fn get(&self, accessor: &Accessor) -> Option<&str> {
        self.inputs.get(accessor).and_then(|input| input.as_deref())
    }

    pub fn active(&self) -> impl Iterator<Item=(&Accessor, &str)> {
        self.inputs.iter().filter_map(|(accessor, input)| Some((accessor, input.as_deref()?)))
    }

    pub fn is_active(&self) -> bool {
        self.active().next().is_some()
    }

    pub fn clear(&mut self) {
        self.inputs.values_mut().for_each(|input| *input = None);
    }
}

/// Direction last used per column plus the column that governs ordering.
#[derive(Clone, Debug, Default)]
pub struct SortState {
    directions: AccessorMap<SortDirection>,
    last: Option<Accessor>
}

impl SortState {
    pub fn new() -> SortState {
        SortState::default()
    }

    pub fn direction(&self, accessor: &Accessor) -> SortDirection {
        self.directions.get(accessor).copied().unwrap_or_default()
    }

    /// Flips the stored direction for `accessor`, makes it the governing column
    /// and returns the new direction.
    pub fn toggle(&mut self, accessor: &Accessor) -> SortDirection {
        let direction = self.direction(accessor).flip();
        self.directions.insert(accessor.clone(), direction);
        self.last = Some(accessor.clone());
        direction
    }

    /// The governing column and its current direction.
    pub fn current(&self) -> Option<(&Accessor, SortDirection)> {
        let accessor = self.last.as_ref()?;
        Some((accessor, self.direction(accessor)))
    }

    pub fn is_current(&self, accessor: &Accessor) -> bool {
        self.last.as_ref() == Some(accessor)
    }
}
