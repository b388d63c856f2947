use std::convert::Infallible;
use std::sync::Arc;

use egui::{Align, Color32, Context, Key, Layout, RichText, ScrollArea, Ui};

use comments::{CommentStore, CommentsPanel, Outcome, PanelStatus, Request};
use movies::Movie;

use crate::computation::Computation;

/// Comments of the selected movie, shown inside the dialog.
pub struct CommentsView {
    panel: CommentsPanel,
    store: Arc<dyn CommentStore>,
    request: Computation<Outcome, Infallible>
}

impl CommentsView {
    pub fn new(store: Arc<dyn CommentStore>) -> Self {
        CommentsView {
            panel: CommentsPanel::new(),
            store,
            request: Computation::Empty
        }
    }

    pub fn open(&mut self, ctx: &Context, title: &str) {
        let request = self.panel.open(title);
        self.dispatch(ctx, request);
    }

    pub fn close(&mut self) {
        self.panel.close();
    }

    fn dispatch(&mut self, ctx: &Context, request: Request) {
        let store = Arc::clone(&self.store);
        self.request.begin(ctx.clone(), move || Ok(request.run(&*store)));
    }

    /// Applies a finished store request, if any.
    pub fn poll(&mut self) {
        if let Some(Ok(outcome)) = self.request.poll() {
            self.panel.finish(outcome);
        }
    }

    /// Returns `true` when the user asked to leave the panel.
    pub fn show(&mut self, ui: &mut Ui, movie: &Movie) -> bool {
        let ctx = ui.ctx().clone();
        let mut back = false;

        ui.horizontal(|ui| {
            back = ui.button("⬅").on_hover_text("Back").clicked();
            ui.heading(format!("{} Comments", movie.title));
        });
        ui.label(RichText::new(format!(
            "{} · {} · {} · {}",
            movie.year,
            movies::format::runtime(movie.runtime.into()),
            movies::format::stars(movie.rating),
            movies::format::genres(&movie.genre)
        )).weak());
        if !movie.description.is_empty() {
            ui.label(&movie.description);
        }
        if !movie.director.is_empty() {
            ui.label(format!("Directed by {}", movie.director));
        }
        ui.separator();

        let status = self.panel.status().cloned();
        let mut retry = None;

        ScrollArea::vertical().max_height(260.0).auto_shrink([false, true]).show(ui, |ui| {
            match &status {
                Some(PanelStatus::Loading) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading comments…");
                    });
                }
                _ if self.panel.comments().is_empty() && self.panel.pending().is_none() => {
                    ui.label(RichText::new("No comments yet.").italics());
                }
                _ => {}
            }

            for comment in self.panel.comments() {
                ui.label(comment);
                ui.separator();
            }
            if let Some(pending) = self.panel.pending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(pending).weak());
                });
            }
        });

        if let Some(PanelStatus::Failed(message)) = &status {
            ui.horizontal(|ui| {
                ui.colored_label(Color32::RED, message);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                        self.panel.dismiss_error();
                    }
                    if self.panel.can_retry() && ui.small_button("Retry").clicked() {
                        retry = self.panel.retry();
                    }
                });
            });
        } else if !self.panel.is_loaded() && self.panel.can_retry() {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Comments could not be loaded.").weak());
                if ui.small_button("Retry").clicked() {
                    retry = self.panel.retry();
                }
            });
        }

        ui.separator();
        let editable = self.panel.is_loaded() && !status.as_ref().is_some_and(PanelStatus::is_busy);
        let mut submit = false;
        ui.horizontal(|ui| {
            let can_submit = self.panel.can_submit();
            if let Some(input) = self.panel.input_mut() {
                let response = ui.add_enabled(
                    editable,
                    egui::TextEdit::singleline(input).hint_text("Write a comment").desired_width(ui.available_width() - 40.0)
                );
                submit = response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
            }
            submit |= ui.add_enabled(can_submit, egui::Button::new("➤")).clicked();
        });

        if let Some(request) = retry {
            self.dispatch(&ctx, request);
        } else if submit {
            if let Some(request) = self.panel.submit() {
                self.dispatch(&ctx, request);
            }
        }

        back
    }
}
