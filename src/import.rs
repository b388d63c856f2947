use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use egui::Ui;
use eframe::Storage;

use movies::{DatasetError, Movie};

use crate::computation::Computation;
use crate::file_picker::FilePicker;

const STORAGE_KEY: &str = "import-dataset-path";

/// Loads a movie dataset from a JSON file, or the one built into the binary.
pub struct ImportPanel {
    path: String,
    loading: Computation<Vec<Movie>, DatasetError>
}

impl ImportPanel {
    pub fn new(cc: &eframe::CreationContext) -> Self {
        let path = cc.storage
            .and_then(|storage| storage.get_string(STORAGE_KEY))
            .and_then(|stored| ron::from_str::<'_, Option<PathBuf>>(&stored).ok().flatten())
            .map_or(String::new(), |path| path.to_string_lossy().into_owned());

        ImportPanel { path, loading: Computation::Empty }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        let path = (!self.path.is_empty()).then(|| PathBuf::from(&self.path));
        match ron::to_string(&path) {
            Ok(stored) => storage.set_string(STORAGE_KEY, stored),
            Err(err) => log::warn!("could not store dataset path: {err}")
        }
    }

    /// Returns the result of a load that finished since the last call.
    pub fn poll(&mut self) -> Option<Result<Vec<Movie>, DatasetError>> {
        self.loading.poll()
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.add(FilePicker::new("dataset-picker", &mut self.path)
            .dialog_title("Movie dataset")
            .add_filter("JSON", &["json"]));

        ui.horizontal(|ui| {
            let idle = !self.loading.is_computing();
            if ui.add_enabled(idle && !self.path.trim().is_empty(), egui::Button::new("Load")).clicked() {
                let path = PathBuf::from(self.path.trim());
                log::info!("loading dataset from {}", path.display());
                self.loading.begin(ui.ctx().clone(), move || {
                    let file = File::open(&path)?;
                    movies::load_from_reader(BufReader::new(file))
                });
            }
            if ui.add_enabled(idle, egui::Button::new("Built-in")).clicked() {
                self.loading.begin(ui.ctx().clone(), movies::bundled);
            }
            if !idle {
                ui.spinner();
            }
        });
    }
}
