use std::time::Instant;

use egui::{Align, Layout, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use datatable::{Accessor, DataTable, FilterCell, HeadEvent, SortDirection};

const HEADER_HEIGHT: f32 = 56.0;
const ROW_HEIGHT: f32 = 26.0;

pub struct TableResponse {
    /// Visible position of the row clicked this frame.
    pub clicked: Option<usize>
}

fn direction_arrow(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ⏶",
        Some(SortDirection::Desc) => " ⏷",
        None => ""
    }
}

fn filter_widget(ui: &mut Ui, cell: &FilterCell<'_>, events: &mut Vec<HeadEvent>) {
    match *cell {
        FilterCell::Text { accessor, placeholder, value } => {
            let mut text = value.to_string();
            let edit = egui::TextEdit::singleline(&mut text)
                .id_salt(("filter", accessor.as_str()))
                .hint_text(placeholder)
                .desired_width(f32::INFINITY);
            if ui.add(edit).changed() {
                events.push(cell.change(text));
            }
        }
        FilterCell::Select { accessor, selected, .. } => {
            egui::ComboBox::from_id_salt(("filter", accessor.as_str()))
                .selected_text(cell.selected_text())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for (text, value) in cell.choices() {
                        if ui.selectable_label(value == selected, text).clicked() && value != selected {
                            events.push(cell.change(value));
                        }
                    }
                });
        }
    }
}

/// Draws the head and the revealed rows of `table`, then applies the head
/// events raised this frame. Bringing the last revealed row into view reveals more.
pub fn show<Item>(
    ui: &mut Ui,
    table: &mut DataTable<Item>,
    hover_text: impl Fn(&Item, &Accessor) -> Option<String>
) -> TableResponse {
    let mut events = Vec::new();
    let mut clicked = None;
    let mut reached_end = false;

    {
        let table = &*table;
        let head = table.head();
        let body = table.body();
        let definition = table.definition();
        let revealed = table.num_revealed();

        TableBuilder::new(ui)
            .striped(true)
            .sense(Sense::click())
            .auto_shrink([false, false])
            .max_scroll_height(f32::INFINITY)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(90.0).resizable(true).clip(true), definition.num_columns())
            .header(HEADER_HEIGHT, |mut header| {
                for (cell, filter) in head.header_cells().zip(head.filter_cells()) {
                    header.col(|ui| {
                        ui.vertical(|ui| {
                            let label = RichText::new(format!("{}{}", cell.label, direction_arrow(cell.direction))).strong();
                            if cell.sortable {
                                if ui.add(egui::Button::new(label).frame(false)).on_hover_text("Sort").clicked() {
                                    events.extend(cell.click());
                                }
                            } else {
                                ui.label(label);
                            }

                            if let Some(filter) = filter {
                                filter_widget(ui, &filter, &mut events);
                            }
                        });
                    });
                }
            })
            .body(|body_ui| {
                body_ui.rows(ROW_HEIGHT, revealed, |mut row| {
                    let index = row.index();
                    let Some(item) = table.row(index) else { return };
                    if index + 1 == revealed {
                        reached_end = true;
                    }

                    for column in definition.columns() {
                        row.col(|ui| {
                            let label = ui.add(egui::Label::new(body.cell(item, column)).truncate().selectable(false));
                            if let Some(text) = hover_text(item, &column.accessor) {
                                label.on_hover_text(text);
                            }
                        });
                    }

                    if row.response().clicked() {
                        clicked = Some(index);
                    }
                });
            });

        if revealed == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No movies match the current filters.").italics());
            });
        }
    }

    let mut changed = false;
    for event in events {
        changed |= table.handle(event);
    }

    if !changed && table.end_shown(reached_end, Instant::now()) {
        log::trace!("revealed {} of {} rows", table.num_revealed(), table.num_visible());
        ui.ctx().request_repaint();
    } else if reached_end && table.num_revealed() < table.num_visible() {
        ui.ctx().request_repaint_after(datatable::DEFAULT_DEBOUNCE);
    }

    TableResponse { clicked }
}
