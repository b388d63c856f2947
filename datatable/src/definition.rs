use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

use indexmap::IndexMap;

use crate::error::{BindingKind, ConfigurationError};
use crate::value::Value;

pub(crate) type AccessorMap<V> = IndexMap<Accessor, V, ahash::RandomState>;

/// Names one attribute of a record. Compared by its string form.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Accessor(Cow<'static, str>);

impl Accessor {
    pub const fn new(name: &'static str) -> Accessor {
        Accessor(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Accessor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Accessor {
    fn from(value: &'static str) -> Self {
        Accessor(Cow::Borrowed(value))
    }
}

impl From<String> for Accessor {
    fn from(value: String) -> Self {
        Accessor(Cow::Owned(value))
    }
}

impl PartialEq<str> for Accessor {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Accessor {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc
}

impl SortDirection {
    pub fn flip(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc
        }
    }

    /// Turns an ascending ordering into one for this direction.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse()
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC"
        }
    }
}

type ValueFn<Item> = Box<dyn Fn(&Item) -> Value + Send + Sync>;
type TransformFn = Box<dyn Fn(&Value) -> String + Send + Sync>;
type PredicateFn<Item> = Box<dyn Fn(&Item, &str) -> bool + Send + Sync>;
type ComparatorFn<Item> = Box<dyn Fn(SortDirection, &Item, &Item) -> Ordering + Send + Sync>;

pub struct Column<Item> {
    pub accessor: Accessor,
    pub name: String,
    value: ValueFn<Item>
}

impl<Item> Column<Item> {
    pub fn new(accessor: impl Into<Accessor>, name: impl Into<String>, value: impl Fn(&Item) -> Value + Send + Sync + 'static) -> Self {
        Column {
            accessor: accessor.into(),
            name: name.into(),
            value: Box::new(value)
        }
    }

    pub fn value(&self, item: &Item) -> Value {
        (self.value)(item)
    }
}

impl<Item> Debug for Column<Item> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column").field("accessor", &self.accessor).field("name", &self.name).finish()
    }
}

pub struct Transform {
    pub accessor: Accessor,
    transform: TransformFn
}

impl Transform {
    pub fn new(accessor: impl Into<Accessor>, transform: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Transform {
            accessor: accessor.into(),
            transform: Box::new(transform)
        }
    }

    pub fn apply(&self, value: &Value) -> String {
        (self.transform)(value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOption {
    pub text: String,
    pub value: String
}

impl SelectOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption { text: text.into(), value: value.into() }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterInput {
    Text { placeholder: String },
    Select { placeholder: String, options: Vec<SelectOption> }
}

impl FilterInput {
    pub fn text(placeholder: impl Into<String>) -> Self {
        FilterInput::Text { placeholder: placeholder.into() }
    }

    pub fn select(placeholder: impl Into<String>, options: Vec<SelectOption>) -> Self {
        FilterInput::Select { placeholder: placeholder.into(), options }
    }

    pub fn placeholder(&self) -> &str {
        match self {
            FilterInput::Text { placeholder } => placeholder,
            FilterInput::Select { placeholder, .. } => placeholder
        }
    }
}

pub struct Filter<Item> {
    pub accessor: Accessor,
    pub input: FilterInput,
    predicate: PredicateFn<Item>
}

impl<Item> Filter<Item> {
    pub fn new(accessor: impl Into<Accessor>, input: FilterInput, predicate: impl Fn(&Item, &str) -> bool + Send + Sync + 'static) -> Self {
        Filter {
            accessor: accessor.into(),
            input,
            predicate: Box::new(predicate)
        }
    }

    pub fn matches(&self, item: &Item, input: &str) -> bool {
        (self.predicate)(item, input)
    }
}

pub struct Sort<Item> {
    pub accessor: Accessor,
    comparator: ComparatorFn<Item>
}

impl<Item> Sort<Item> {
    /// Comparator receives the direction and is responsible for honouring it.
    pub fn new(accessor: impl Into<Accessor>, comparator: impl Fn(SortDirection, &Item, &Item) -> Ordering + Send + Sync + 'static) -> Self {
        Sort {
            accessor: accessor.into(),
            comparator: Box::new(comparator)
        }
    }

    /// Ascending comparator; descending order is derived from it.
    pub fn by(accessor: impl Into<Accessor>, ascending: impl Fn(&Item, &Item) -> Ordering + Send + Sync + 'static) -> Self {
        Sort::new(accessor, move |direction, a, b| direction.apply(ascending(a, b)))
    }

    pub fn by_key<K: Ord>(accessor: impl Into<Accessor>, key: impl Fn(&Item) -> K + Send + Sync + 'static) -> Self {
        Sort::by(accessor, move |a, b| key(a).cmp(&key(b)))
    }

    pub fn compare(&self, direction: SortDirection, a: &Item, b: &Item) -> Ordering {
        (self.comparator)(direction, a, b)
    }
}

/// Validated set of columns and their per-accessor bindings.
pub struct TableDefinition<Item> {
    columns: AccessorMap<Column<Item>>,
    transforms: AccessorMap<Transform>,
    filters: AccessorMap<Filter<Item>>,
    sorts: AccessorMap<Sort<Item>>
}

impl<Item> TableDefinition<Item> {
    pub fn builder() -> TableDefinitionBuilder<Item> {
        TableDefinitionBuilder::new()
    }

    pub fn columns(&self) -> impl Iterator<Item=&Column<Item>> {
        self.columns.values()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, accessor: &Accessor) -> Option<&Column<Item>> {
        self.columns.get(accessor)
    }

    pub fn transform(&self, accessor: &Accessor) -> Option<&Transform> {
        self.transforms.get(accessor)
    }

    pub fn filter(&self, accessor: &Accessor) -> Option<&Filter<Item>> {
        self.filters.get(accessor)
    }

    pub fn filters(&self) -> impl Iterator<Item=&Filter<Item>> {
        self.filters.values()
    }

    pub fn sort(&self, accessor: &Accessor) -> Option<&Sort<Item>> {
        self.sorts.get(accessor)
    }
}

pub struct TableDefinitionBuilder<Item> {
    columns: Vec<Column<Item>>,
    transforms: Vec<Transform>,
    filters: Vec<Filter<Item>>,
    sorts: Vec<Sort<Item>>
}

impl<Item> TableDefinitionBuilder<Item> {
    pub fn new() -> Self {
        TableDefinitionBuilder {
            columns: vec![],
            transforms: vec![],
            filters: vec![],
            sorts: vec![]
        }
    }

    pub fn column(mut self, column: Column<Item>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn filter(mut self, filter: Filter<Item>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: Sort<Item>) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn build(self) -> Result<TableDefinition<Item>, ConfigurationError> {
        if self.columns.is_empty() {
            return Err(ConfigurationError::NoColumns);
        }

        let mut columns = AccessorMap::default();
        for column in self.columns {
            if columns.contains_key(&column.accessor) {
                return Err(ConfigurationError::DuplicateColumn(column.accessor));
            }
            columns.insert(column.accessor.clone(), column);
        }

        let transforms = bind(&columns, BindingKind::Transform, self.transforms, |t| &t.accessor)?;
        let filters = bind(&columns, BindingKind::Filter, self.filters, |f| &f.accessor)?;
        let sorts = bind(&columns, BindingKind::Sort, self.sorts, |s| &s.accessor)?;

        log::debug!(
            "table definition: {} columns, {} transforms, {} filters, {} sorts",
            columns.len(), transforms.len(), filters.len(), sorts.len()
        );

        Ok(TableDefinition { columns, transforms, filters, sorts })
    }
}

impl<Item> Default for TableDefinitionBuilder<Item> {
    fn default() -> Self {
        Self::new()
    }
}

fn bind<Item, T>(
    columns: &AccessorMap<Column<Item>>,
    kind: BindingKind,
    bindings: Vec<T>,
    accessor_of: impl Fn(&T) -> &Accessor
) -> Result<AccessorMap<T>, ConfigurationError> {
    let mut map = AccessorMap::default();
    for binding in bindings {
        let accessor = accessor_of(&binding).clone();
        if !columns.contains_key(&accessor) {
            return Err(ConfigurationError::UnknownAccessor { kind, accessor });
        }
        if map.contains_key(&accessor) {
            return Err(ConfigurationError::DuplicateBinding { kind, accessor });
        }
        map.insert(accessor, binding);
    }
    Ok(map)
}
