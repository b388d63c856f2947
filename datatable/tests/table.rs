use std::time::{Duration, Instant};

use datatable::{Column, DataTable, Filter, FilterInput, HeadEvent, RevealConfig, SelectOption, Sort, SortDirection, TableDefinition, Transform, Value};

#[derive(Clone, Debug, PartialEq)]
struct Film {
    title: &'static str,
    year: i64,
    genre: &'static str
}

fn film(title: &'static str, year: i64, genre: &'static str) -> Film {
    Film { title, year, genre }
}

fn definition() -> TableDefinition<Film> {
    TableDefinition::builder()
        .column(Column::new("title", "Title", |f: &Film| f.title.into()))
        .column(Column::new("year", "Year", |f: &Film| f.year.into()))
        .column(Column::new("genre", "Genre", |f: &Film| f.genre.into()))
        .transform(Transform::new("genre", |v: &Value| v.to_string().to_uppercase()))
        .filter(Filter::new("title", FilterInput::text("Filter by title"), |f: &Film, v| {
            f.title.to_lowercase().contains(&v.to_lowercase())
        }))
        .filter(Filter::new(
            "year",
            FilterInput::select("Filter by year", vec![SelectOption::new("1999", "1999"), SelectOption::new("2000", "2000")]),
            |f: &Film, v| f.year.to_string() == v
        ))
        .filter(Filter::new("genre", FilterInput::text("Filter by genre"), |f: &Film, v| f.genre == v))
        .sort(Sort::by_key("title", |f: &Film| f.title))
        .sort(Sort::by_key("year", |f: &Film| f.year))
        .build()
        .unwrap()
}

fn films() -> Vec<Film> {
    vec![
        film("Heat", 1995, "crime"),
        film("The Matrix", 1999, "scifi"),
        film("Gladiator", 2000, "action"),
        film("Memento", 2000, "thriller"),
        film("Fight Club", 1999, "drama"),
        film("Magnolia", 1999, "drama"),
    ]
}

fn titles(table: &DataTable<Film>) -> Vec<&'static str> {
    table.visible().map(|f| f.title).collect()
}

#[test]
fn filter_by_year_scenario() {
    let mut table = DataTable::new(definition(), vec![film("A", 2000, "x"), film("B", 1999, "x")]);
    assert!(table.set_filter(&"year".into(), Some("1999")));
    assert_eq!(table.visible().cloned().collect::<Vec<_>>(), vec![film("B", 1999, "x")]);
}

#[test]
fn sort_by_year_scenario() {
    let mut table = DataTable::new(definition(), vec![film("A", 1999, "x"), film("B", 2000, "x")]);
    assert_eq!(table.toggle_sort(&"year".into()), Some(SortDirection::Asc));
    assert_eq!(table.visible().map(|f| f.year).collect::<Vec<_>>(), vec![1999, 2000]);
    assert_eq!(table.toggle_sort(&"year".into()), Some(SortDirection::Desc));
    assert_eq!(table.visible().map(|f| f.year).collect::<Vec<_>>(), vec![2000, 1999]);
}

#[test]
fn filters_are_conjunctive_over_the_base_set() {
    let data = films();
    let mut table = DataTable::new(definition(), data.clone());
    table.set_filter(&"year".into(), Some("1999"));
    table.set_filter(&"genre".into(), Some("drama"));

    let expected: Vec<_> = data.iter()
        .filter(|f| f.year == 1999 && f.genre == "drama")
        .map(|f| f.title)
        .collect();
    assert_eq!(titles(&table), expected);

    // replacing a filter value must not compound with the previous one
    table.set_filter(&"year".into(), Some("2000"));
    assert!(titles(&table).is_empty());
    table.set_filter(&"genre".into(), None);
    assert_eq!(titles(&table), vec!["Gladiator", "Memento"]);
}

#[test]
fn clearing_a_filter_restores_rows() {
    let mut table = DataTable::new(definition(), films());
    table.set_filter(&"title".into(), Some("m"));
    table.set_filter(&"year".into(), Some("1999"));
    assert_eq!(titles(&table), vec!["The Matrix", "Magnolia"]);

    table.set_filter(&"year".into(), Some(""));
    assert_eq!(titles(&table), vec!["The Matrix", "Memento", "Magnolia"]);
}

#[test]
fn reapplying_a_filter_is_idempotent() {
    let mut table = DataTable::new(definition(), films());
    table.set_filter(&"title".into(), Some("the"));
    let once = titles(&table);
    table.set_filter(&"title".into(), Some("the"));
    assert_eq!(titles(&table), once);
}

#[test]
fn double_toggle_reverses_order() {
    let mut table = DataTable::new(definition(), films());
    table.toggle_sort(&"title".into());
    let ascending = titles(&table);
    table.toggle_sort(&"title".into());
    let mut descending = titles(&table);
    descending.reverse();
    assert_eq!(ascending, descending);
}

#[test]
fn sort_survives_filter_change() {
    let mut table = DataTable::new(definition(), films());
    table.toggle_sort(&"title".into());
    table.set_filter(&"year".into(), Some("1999"));
    assert_eq!(titles(&table), vec!["Fight Club", "Magnolia", "The Matrix"]);
}

#[test]
fn unknown_accessors_are_ignored() {
    let mut table = DataTable::new(definition(), films());
    assert!(!table.set_filter(&"director".into(), Some("Mann")));
    assert!(!table.handle(HeadEvent::Sort("genre".into())));
    assert_eq!(titles(&table), films().iter().map(|f| f.title).collect::<Vec<_>>());
}

#[test]
fn head_events_drive_the_table() {
    let mut table = DataTable::new(definition(), films());
    let event = {
        let head = table.head();
        let cell = head.filter_cells().nth(1).flatten().unwrap();
        cell.change("2000")
    };
    assert!(table.handle(event));
    assert_eq!(titles(&table), vec!["Gladiator", "Memento"]);
    assert!(table.handle(HeadEvent::Filter("year".into(), None)));
    assert_eq!(table.num_visible(), 6);
}

#[test]
fn body_renders_transformed_cells() {
    let table = DataTable::new(definition(), films());
    let body = table.body();
    let rows: Vec<_> = table.visible().take(2).map(|f| body.row(f)).collect();
    assert_eq!(rows[0], vec!["Heat", "1995", "CRIME"]);
    assert_eq!(rows[1], vec!["The Matrix", "1999", "SCIFI"]);
}

#[test]
fn reveal_window_grows_with_scroll() {
    let mut table = DataTable::new(definition(), films()).with_reveal(RevealConfig::new(2, 3));
    let start = Instant::now();
    assert_eq!(table.revealed().count(), 2);

    assert!(!table.scroll_signal(true, start));
    assert!(table.scroll_signal(false, start));
    assert_eq!(table.revealed().count(), 5);

    assert!(table.reveal_more(start + Duration::from_millis(300)));
    assert_eq!(table.revealed().count(), 6);
    assert!(!table.reveal_more(start + Duration::from_millis(600)));
}

#[test]
fn resting_on_the_last_row_reveals_once() {
    let mut table = DataTable::new(definition(), films()).with_reveal(RevealConfig::new(2, 3));
    let start = Instant::now();

    assert!(table.end_shown(true, start));
    assert_eq!(table.revealed().count(), 5);
    assert!(!table.end_shown(false, start + Duration::from_millis(300)));
    assert_eq!(table.revealed().count(), 5);

    assert!(table.end_shown(true, start + Duration::from_millis(600)));
    assert_eq!(table.revealed().count(), 6);
    assert!(!table.end_shown(true, start + Duration::from_millis(900)));
}
