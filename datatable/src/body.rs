use crate::definition::{Column, TableDefinition};

/// Turns records into display strings, one per column.
pub struct TableBody<'a, Item> {
    definition: &'a TableDefinition<Item>
}

impl<'a, Item> TableBody<'a, Item> {
    pub fn new(definition: &'a TableDefinition<Item>) -> Self {
        TableBody { definition }
    }

    pub fn cell(&self, item: &Item, column: &Column<Item>) -> String {
        let value = column.value(item);
        match self.definition.transform(&column.accessor) {
            Some(transform) => transform.apply(&value),
            None if value.is_falsy() => String::new(),
            None => value.to_string()
        }
    }

    pub fn row(&self, item: &Item) -> Vec<String> {
        self.definition.columns().map(|column| self.cell(item, column)).collect()
    }

    pub fn rows<'i>(&'i self, items: impl IntoIterator<Item=&'i Item> + 'i) -> impl Iterator<Item=Vec<String>> + 'i
    where
        Item: 'i
    {
        items.into_iter().map(move |item| self.row(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Transform;
    use crate::value::Value;

    struct Film {
        title: Option<&'static str>,
        runtime: i64
    }

    fn definition() -> TableDefinition<Film> {
        TableDefinition::builder()
            .column(Column::new("title", "Title", |f: &Film| f.title.into()))
            .column(Column::new("runtime", "Runtime", |f: &Film| f.runtime.into()))
            .column(Column::new("votes", "Votes", |f: &Film| f.runtime.into()))
            .transform(Transform::new("runtime", |v: &Value| format!("{}m", v.as_integer().unwrap_or(0))))
            .build()
            .unwrap()
    }

    #[test]
    fn applies_transform_or_default() {
        let definition = definition();
        let body = TableBody::new(&definition);
        let row = body.row(&Film { title: Some("Heat"), runtime: 170 });
        assert_eq!(row, vec!["Heat", "170m", "170"]);
    }

    #[test]
    fn missing_values_render_empty() {
        let definition = definition();
        let body = TableBody::new(&definition);
        let row = body.row(&Film { title: None, runtime: 0 });
        assert_eq!(row, vec!["", "0m", ""]);
    }
}
