use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use egui::{Response, Ui};
use futures_lite::future::block_on;
use rfd::AsyncFileDialog;

type FilePickerHandle = Option<JoinHandle<Option<PathBuf>>>;

/// Path text field with a native "Choose File" dialog running off the UI thread.
pub struct FilePicker<'a> {
    id_salt: egui::Id,
    async_file_dialog: AsyncFileDialog,
    path: &'a mut String
}

impl<'a> FilePicker<'a> {
    pub fn new(id: impl Into<egui::Id>, path: &'a mut String) -> Self {
        FilePicker {
            id_salt: id.into(),
            async_file_dialog: AsyncFileDialog::new(),
            path
        }
    }

    pub fn dialog_title(mut self, title: impl Into<String>) -> Self {
        self.async_file_dialog = self.async_file_dialog.set_title(title);
        self
    }

    pub fn add_filter(mut self, name: impl Into<String>, extensions: &[impl ToString]) -> Self {
        self.async_file_dialog = self.async_file_dialog.add_filter(name, extensions);
        self
    }
}

impl egui::Widget for FilePicker<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let maybe_handle = ui.data_mut(|data|
            data.get_temp_mut_or_default::<Arc<Mutex<FilePickerHandle>>>(self.id_salt).clone()
        );
        let mut lock = maybe_handle.lock().unwrap_or_else(PoisonError::into_inner);

        ui.horizontal(|ui| {
            if let Some(handle) = lock.take_if(|handle| handle.is_finished()) {
                if let Ok(Some(path)) = handle.join() {
                    *self.path = path.to_string_lossy().into_owned();
                }
            }
            let choose_enabled = lock.is_none();

            if ui.add_enabled(choose_enabled, egui::Button::new("Choose File")).clicked() {
                let dialog = match Path::new(self.path.as_str()).parent() {
                    Some(dir) if dir.is_dir() => self.async_file_dialog.set_directory(dir),
                    _ => self.async_file_dialog
                };

                let ctx_clone = ui.ctx().clone();
                let pick_task = dialog.pick_file();

                *lock = Some(thread::spawn(move || {
                    let file_path = block_on(pick_task).map(|handle| handle.path().to_owned());
                    ctx_clone.request_repaint_after(Duration::from_millis(100));
                    file_path
                }));
            }
            ui.add(egui::TextEdit::singleline(self.path).hint_text("movies.json"));
        }).response
    }
}
