use std::sync::Arc;
use std::time::Instant;

use crate::definition::{Accessor, SortDirection, TableDefinition};
use crate::head::{HeadEvent, TableHead};
use crate::body::TableBody;
use crate::reveal::{RevealConfig, RevealWindow};
use crate::state::{FilterState, SortState};

/// Indices of `base` that pass every active filter, ordered by `sort` when given.
///
/// Always starts from the full base dataset.
pub fn derive_visible<Item>(
    definition: &TableDefinition<Item>,
    base: &[Item],
    filters: &FilterState,
    sort: Option<(&Accessor, SortDirection)>
) -> Vec<usize> {
    let active: Vec<_> = filters.active()
        .filter_map(|(accessor, input)| Some((definition.filter(accessor)?, input)))
        .collect();

    let mut rows: Vec<usize> = (0..base.len())
        .filter(|&idx| active.iter().all(|(filter, input)| filter.matches(&base[idx], input)))
        .collect();

    if let Some((accessor, direction)) = sort {
        sort_rows(definition, base, &mut rows, accessor, direction);
    }

    rows
}

fn sort_rows<Item>(definition: &TableDefinition<Item>, base: &[Item], rows: &mut [usize], accessor: &Accessor, direction: SortDirection) {
    if let Some(sort) = definition.sort(accessor) {
        rows.sort_by(|&a_idx, &b_idx| sort.compare(direction, &base[a_idx], &base[b_idx]));
    }
}

/// Filter, sort and reveal state over an immutable dataset.
pub struct DataTable<Item> {
    definition: Arc<TableDefinition<Item>>,
    data: Arc<[Item]>,
    filters: FilterState,
    sorts: SortState,
    visible: Vec<usize>,
    reveal: Option<RevealWindow>,
}

impl<Item> DataTable<Item> {
    pub fn new(definition: impl Into<Arc<TableDefinition<Item>>>, data: impl Into<Arc<[Item]>>) -> DataTable<Item> {
        let definition = definition.into();
        let data = data.into();
        let filters = FilterState::new(&*definition);
        DataTable {
            visible: (0..data.len()).collect(),
            definition,
            data,
            filters,
            sorts: SortState::new(),
            reveal: None,
        }
    }

    pub fn with_reveal(mut self, config: RevealConfig) -> Self {
        self.reveal = Some(RevealWindow::new(config));
        self
    }

    pub fn definition(&self) -> &TableDefinition<Item> {
        &self.definition
    }

    pub fn data(&self) -> &[Item] {
        &self.data
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sorts(&self) -> &SortState {
        &self.sorts
    }

    /// Base-dataset indices of every visible row, ignoring the reveal window.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible(&self) -> impl Iterator<Item=&Item> + '_ {
        self.visible.iter().map(|&idx| &self.data[idx])
    }

    pub fn num_visible(&self) -> usize {
        self.visible.len()
    }

    /// Rows that should be rendered right now.
    pub fn num_revealed(&self) -> usize {
        match &self.reveal {
            Some(reveal) => reveal.len(self.visible.len()),
            None => self.visible.len()
        }
    }

    pub fn revealed(&self) -> impl Iterator<Item=&Item> + '_ {
        self.visible().take(self.num_revealed())
    }

    /// Record at a visible position, as reported by a row click.
    pub fn row(&self, position: usize) -> Option<&Item> {
        self.visible.get(position).map(|&idx| &self.data[idx])
    }

    pub fn head(&self) -> TableHead<'_, Item> {
        TableHead::new(&*self.definition, &self.filters, &self.sorts)
    }

    pub fn body(&self) -> TableBody<'_, Item> {
        TableBody::new(&*self.definition)
    }

    /// Applies a filter input. Unknown columns are ignored and return `false`.
    pub fn set_filter(&mut self, accessor: &Accessor, input: Option<&str>) -> bool {
        if self.definition.filter(accessor).is_none() {
            return false;
        }
        self.filters.set(accessor, input);
        self.recompute();
        if let Some(reveal) = &mut self.reveal {
            reveal.reset();
        }
        log::debug!("filter `{}` = {:?}: {} of {} rows visible", accessor, input, self.visible.len(), self.data.len());
        true
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.recompute();
        if let Some(reveal) = &mut self.reveal {
            reveal.reset();
        }
    }

    /// Toggles the sort direction of a column and reorders the visible rows.
    /// Unknown columns are ignored and return `None`.
    pub fn toggle_sort(&mut self, accessor: &Accessor) -> Option<SortDirection> {
        self.definition.sort(accessor)?;
        let direction = self.sorts.toggle(accessor);
        sort_rows(&*self.definition, &*self.data, &mut self.visible, accessor, direction);
        log::debug!("sort `{}` {}", accessor, direction.name());
        Some(direction)
    }

    pub fn handle(&mut self, event: HeadEvent) -> bool {
        match event {
            HeadEvent::Sort(accessor) => self.toggle_sort(&accessor).is_some(),
            HeadEvent::Filter(accessor, input) => self.set_filter(&accessor, input.as_deref())
        }
    }

    /// Feeds a debounced "scrolled to bottom" pulse. Returns `true` when more rows were revealed.
    pub fn reveal_more(&mut self, now: Instant) -> bool {
        let total = self.visible.len();
        match &mut self.reveal {
            Some(reveal) => reveal.pulse(now, total),
            None => false
        }
    }

    /// Reports whether the last revealed row is on screen this frame.
    /// Returns `true` when more rows were revealed.
    pub fn end_shown(&mut self, shown: bool, now: Instant) -> bool {
        let total = self.visible.len();
        match &mut self.reveal {
            Some(reveal) => reveal.end_shown(shown, now, total),
            None => false
        }
    }

    /// Feeds the raw bottom signal for callers that track edges themselves.
    pub fn scroll_signal(&mut self, at_bottom: bool, now: Instant) -> bool {
        let total = self.visible.len();
        match &mut self.reveal {
            Some(reveal) => reveal.signal(at_bottom, now, total),
            None => false
        }
    }

    fn recompute(&mut self) {
        self.visible = derive_visible(&*self.definition, &*self.data, &self.filters, self.sorts.current());
    }
}
