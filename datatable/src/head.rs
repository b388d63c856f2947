use crate::definition::{Accessor, FilterInput, SelectOption, SortDirection, TableDefinition};
use crate::state::{FilterState, SortState};

/// User intent reported by the table head.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeadEvent {
    Sort(Accessor),
    /// Raw filter input. `None`, empty and whitespace-only input all clear the filter.
    Filter(Accessor, Option<String>)
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCell<'a> {
    pub accessor: &'a Accessor,
    pub label: &'a str,
    pub sortable: bool,
    /// Direction of the column that currently governs ordering.
    pub direction: Option<SortDirection>
}

impl HeaderCell<'_> {
    pub fn click(&self) -> Option<HeadEvent> {
        self.sortable.then(|| HeadEvent::Sort(self.accessor.clone()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterCell<'a> {
    Text {
        accessor: &'a Accessor,
        placeholder: &'a str,
        value: &'a str
    },
    Select {
        accessor: &'a Accessor,
        placeholder: &'a str,
        options: &'a [SelectOption],
        selected: &'a str
    }
}

impl<'a> FilterCell<'a> {
    pub fn accessor(&self) -> &'a Accessor {
        match *self {
            FilterCell::Text { accessor, .. } => accessor,
            FilterCell::Select { accessor, .. } => accessor
        }
    }

    /// `(text, value)` pairs, starting with the clearing sentinel whose value is empty.
    pub fn choices(&self) -> impl Iterator<Item=(&'a str, &'a str)> {
        let (placeholder, options): (&'a str, &'a [SelectOption]) = match *self {
            FilterCell::Select { placeholder, options, .. } => (placeholder, options),
            FilterCell::Text { .. } => ("", &[])
        };
        let sentinel = matches!(self, FilterCell::Select { .. }).then_some((placeholder, ""));
        sentinel.into_iter().chain(options.iter().map(|option| (option.text.as_str(), option.value.as_str())))
    }

    /// Text shown for the current selection, falling back to the placeholder.
    pub fn selected_text(&self) -> &'a str {
        match *self {
            FilterCell::Text { placeholder, value, .. } => if value.is_empty() { placeholder } else { value },
            FilterCell::Select { placeholder, options, selected, .. } => options.iter()
                .find(|option| option.value == selected)
                .map_or(placeholder, |option| option.text.as_str())
        }
    }

    pub fn change(&self, input: impl Into<String>) -> HeadEvent {
        let input = input.into();
        let input = (!input.is_empty()).then_some(input);
        HeadEvent::Filter(self.accessor().clone(), input)
    }
}

/// Render model for the header row and the filter row.
pub struct TableHead<'a, Item> {
    definition: &'a TableDefinition<Item>,
    filters: &'a FilterState,
    sorts: &'a SortState
}

impl<'a, Item> TableHead<'a, Item> {
    pub fn new(definition: &'a TableDefinition<Item>, filters: &'a FilterState, sorts: &'a SortState) -> Self {
        TableHead { definition, filters, sorts }
    }

    pub fn header_cells(&self) -> impl Iterator<Item=HeaderCell<'a>> + '_ {
        let definition = self.definition;
        let sorts = self.sorts;
        definition.columns().map(move |column| HeaderCell {
            accessor: &column.accessor,
            label: &column.name,
            sortable: definition.sort(&column.accessor).is_some(),
            direction: sorts.is_current(&column.accessor).then(|| sorts.direction(&column.accessor))
        })
    }

    /// One entry per column; `None` where the column has no filter.
    pub fn filter_cells(&self) -> impl Iterator<Item=Option<FilterCell<'a>>> + '_ {
        let definition = self.definition;
        let filters = self.filters;
        definition.columns().map(move |column| {
            let filter = definition.filter(&column.accessor)?;
            let value = filters.get(&column.accessor).unwrap_or("");
            Some(match &filter.input {
                FilterInput::Text { placeholder } => FilterCell::Text {
                    accessor: &filter.accessor,
                    placeholder,
                    value
                },
                FilterInput::Select { placeholder, options } => FilterCell::Select {
                    accessor: &filter.accessor,
                    placeholder,
                    options,
                    selected: value
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Column, Filter, Sort};
    use crate::value::Value;

    fn definition() -> TableDefinition<(String, i64)> {
        TableDefinition::builder()
            .column(Column::new("name", "Name", |r: &(String, i64)| r.0.clone().into()))
            .column(Column::new("year", "Year", |r: &(String, i64)| r.1.into()))
            .column(Column::new("note", "Note", |_: &(String, i64)| Value::Null))
            .filter(Filter::new("name", FilterInput::text("Filter by name"), |r: &(String, i64), v| r.0.contains(v)))
            .filter(Filter::new(
                "year",
                FilterInput::select("Any year", vec![SelectOption::new("1999", "1999"), SelectOption::new("2000", "2000")]),
                |r: &(String, i64), v| r.1.to_string() == v
            ))
            .sort(Sort::by_key("year", |r: &(String, i64)| r.1))
            .build()
            .unwrap()
    }

    #[test]
    fn one_cell_per_column() {
        let definition = definition();
        let filters = FilterState::new(&definition);
        let sorts = SortState::new();
        let head = TableHead::new(&definition, &filters, &sorts);

        let headers: Vec<_> = head.header_cells().collect();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0].label, "Name");
        assert!(!headers[0].sortable);
        assert!(headers[0].click().is_none());
        assert_eq!(headers[1].click(), Some(HeadEvent::Sort("year".into())));

        let cells: Vec<_> = head.filter_cells().collect();
        assert_eq!(cells.len(), 3);
        assert!(matches!(cells[0], Some(FilterCell::Text { placeholder: "Filter by name", .. })));
        assert!(cells[2].is_none());
    }

    #[test]
    fn select_starts_with_clearing_sentinel() {
        let definition = definition();
        let filters = FilterState::new(&definition);
        let sorts = SortState::new();
        let head = TableHead::new(&definition, &filters, &sorts);

        let year = head.filter_cells().nth(1).flatten().unwrap();
        let choices: Vec<_> = year.choices().collect();
        assert_eq!(choices, vec![("Any year", ""), ("1999", "1999"), ("2000", "2000")]);
        assert_eq!(year.selected_text(), "Any year");
        assert_eq!(year.change(""), HeadEvent::Filter("year".into(), None));
        assert_eq!(year.change("1999"), HeadEvent::Filter("year".into(), Some("1999".into())));
    }

    #[test]
    fn marks_governing_sort_column() {
        let definition = definition();
        let filters = FilterState::new(&definition);
        let mut sorts = SortState::new();
        sorts.toggle(&"year".into());
        let head = TableHead::new(&definition, &filters, &sorts);
        let directions: Vec<_> = head.header_cells().map(|cell| cell.direction).collect();
        assert_eq!(directions, vec![None, Some(SortDirection::Asc), None]);
    }
}
