#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod comments_view;
mod computation;
mod config;
mod dialog;
mod file_picker;
mod import;
mod table_view;

use std::fs::{self, File};
use std::sync::Arc;

use egui::{Align, Align2, Context, Direction, Layout, RichText, Visuals};
use eframe::{Frame, Storage};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use comments::{CommentStore, FirestoreStore, MemoryStore};
use datatable::{ConfigurationError, DataTable, RevealConfig};
use movies::Movie;

use crate::comments_view::CommentsView;
use crate::config::{AppConfig, ConfigError};
use crate::dialog::Dialog;
use crate::import::ImportPanel;

const LOG_FILENAME: &str = "movie-browser.log";

fn toast(kind: ToastKind, text: impl Into<String>) -> Toast {
    let text: String = text.into();
    Toast {
        text: text.into(),
        kind,
        options: ToastOptions::default()
            .duration_in_seconds(5.0)
            .show_progress(true),
        ..Default::default()
    }
}

fn build_table(movies: Vec<Movie>, reveal: RevealConfig) -> Result<DataTable<Movie>, ConfigurationError> {
    let definition = movies::definition(&movies)?;
    Ok(DataTable::new(definition, movies).with_reveal(reveal))
}

struct App {
    table: Option<DataTable<Movie>>,
    reveal: RevealConfig,

    import: ImportPanel,
    show_import: bool,

    comments: CommentsView,
    selected: Option<Movie>,

    is_maximized: bool,
    startup_messages: Vec<Toast>
}

impl App {
    fn new(cc: &eframe::CreationContext, config: AppConfig) -> App {
        let was_maximized = cc.storage.and_then(|store| store.get_string("was-maximized")).map_or(false, |s| s == "true");
        if was_maximized {
            cc.egui_ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(true));
        }

        let reveal = config.reveal();
        let mut startup_messages = Vec::new();

        let table = match movies::bundled() {
            Ok(movies) => match build_table(movies, reveal) {
                Ok(table) => Some(table),
                Err(err) => {
                    log::error!("invalid movies table: {err}");
                    startup_messages.push(toast(ToastKind::Error, format!("Invalid movies table: {err}")));
                    None
                }
            },
            Err(err) => {
                log::error!("built-in dataset failed to load: {err}");
                startup_messages.push(toast(ToastKind::Error, format!("Could not load movies: {err}")));
                None
            }
        };

        let store: Arc<dyn CommentStore> = match config.store {
            Some(store) => {
                log::info!("using firestore project {:?} for comments", store.project_id);
                Arc::new(FirestoreStore::new(store))
            }
            None => {
                log::info!("no comment store configured; comments are kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        App {
            table,
            reveal,

            import: ImportPanel::new(cc),
            show_import: false,

            comments: CommentsView::new(store),
            selected: None,

            is_maximized: was_maximized,
            startup_messages
        }
    }

    fn close_dialog(&mut self) {
        self.selected = None;
        self.comments.close();
    }

    fn replace_dataset(&mut self, movies: Vec<Movie>, toasts: &mut Toasts) {
        let count = movies.len();
        match build_table(movies, self.reveal) {
            Ok(table) => {
                self.close_dialog();
                self.table = Some(table);
                toasts.add(toast(ToastKind::Success, format!("Loaded {count} movies.")));
            }
            Err(err) => {
                log::error!("invalid movies table: {err}");
                toasts.add(toast(ToastKind::Error, format!("Invalid movies table: {err}")));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.is_maximized = ctx.input(|state| state.viewport().maximized.unwrap_or(false));

        let mut toasts = Toasts::new()
            .anchor(Align2::LEFT_BOTTOM, (5.0, -5.0))
            .direction(Direction::BottomUp);
        for message in self.startup_messages.drain(..) {
            toasts.add(message);
        }

        ctx.set_visuals(Visuals::light());

        self.comments.poll();
        match self.import.poll() {
            Some(Ok(movies)) => self.replace_dataset(movies, &mut toasts),
            Some(Err(err)) => {
                log::warn!("dataset import failed: {err}");
                toasts.add(toast(ToastKind::Error, format!("Import failed: {err}")));
            }
            None => {}
        }

        egui::TopBottomPanel::top("top-panel").show(ctx, |ui| {
            ui.add_space(3.0);
            ui.horizontal(|ui| {
                ui.heading("Movies");
                if let Some(table) = &mut self.table {
                    ui.separator();
                    ui.label(format!("{} of {} movies", table.num_visible(), table.data().len()));
                    if ui.add_enabled(table.filters().is_active(), egui::Button::new("Clear filters")).clicked() {
                        table.clear_filters();
                    }
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_import, "Import");
                });
            });
            ui.add_space(3.0);
        });

        egui::SidePanel::left("import-panel")
            .min_width(240.0)
            .max_width(400.0)
            .show_animated(ctx, self.show_import, |ui| {
                ui.add_space(3.0);
                ui.label(RichText::new("Dataset").strong());
                ui.separator();
                self.import.show(ui);
            });

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            match &mut self.table {
                Some(table) => {
                    let response = table_view::show(ui, table, |movie: &Movie, accessor| {
                        (accessor == &movies::RATING).then(|| movies::format::stars(movie.rating))
                    });
                    clicked = response.clicked.and_then(|position| table.row(position)).cloned();
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Label::new(RichText::new("No Data").size(40.0)));
                    });
                }
            }
        });

        if let Some(movie) = clicked {
            log::debug!("selected {:?}", movie.title);
            self.comments.open(ctx, &movie.title);
            self.selected = Some(movie);
        }

        let selected = &self.selected;
        let comments = &mut self.comments;
        let response = Dialog::new("movie-dialog").max_width_fraction(0.5).show(ctx, selected.is_some(), |ui| {
            selected.as_ref().is_some_and(|movie| comments.show(ui, movie))
        });
        if response.close_requested || response.inner == Some(true) {
            self.close_dialog();
        }

        toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        storage.set_string("was-maximized", self.is_maximized.to_string());
        self.import.save(storage);
    }

    fn persist_egui_memory(&self) -> bool { false }
}

fn init_logging(config: &AppConfig) {
    let level = config.level_filter();
    let log_file = config::data_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::create(dir.join(LOG_FILENAME)).ok()
    });

    let initialized = match log_file {
        Some(file) => WriteLogger::init(level, Config::default(), file).is_ok(),
        None => false
    };
    if !initialized {
        let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
    }
}

fn main() -> eframe::Result<()> {
    let loaded: Result<AppConfig, ConfigError> = match config::config_dir() {
        Some(dir) => AppConfig::load(dir),
        None => Ok(AppConfig::default())
    };
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(&config);
    if let Err(err) = loaded {
        log::warn!("{err}; using default settings");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("Movie Browser")
        .with_inner_size([1100.0, 720.0]);
    let options = eframe::NativeOptions {
        centered: true,
        viewport,
        ..Default::default()
    };
    eframe::run_native("Movie Browser", options, Box::new(move |cc| Ok(Box::new(App::new(cc, config)))))
}
