use egui::{Align2, Color32, Context, Id, Order, Sense, Ui, Vec2};

pub struct DialogResponse<R> {
    /// Overlay clicked or Escape pressed.
    pub close_requested: bool,
    pub inner: Option<R>
}

/// Modal content centered over a dimming overlay. Draws nothing when hidden.
pub struct Dialog {
    id: Id,
    max_width_fraction: f32
}

impl Dialog {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Dialog {
            id: Id::new(id_salt),
            max_width_fraction: 0.6
        }
    }

    pub fn max_width_fraction(mut self, fraction: f32) -> Self {
        self.max_width_fraction = fraction.clamp(0.1, 1.0);
        self
    }

    pub fn show<R>(self, ctx: &Context, visible: bool, add_contents: impl FnOnce(&mut Ui) -> R) -> DialogResponse<R> {
        if !visible {
            return DialogResponse { close_requested: false, inner: None };
        }

        let screen = ctx.screen_rect();
        let overlay_clicked = egui::Area::new(self.id.with("overlay"))
            .order(Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(screen, 0.0, Color32::from_black_alpha(160));
                ui.allocate_rect(screen, Sense::click()).clicked()
            })
            .inner;

        let max_width = screen.width() * self.max_width_fraction;
        let inner = egui::Area::new(self.id.with("content"))
            .order(Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.set_max_height(screen.height() * 0.8);
                    add_contents(ui)
                }).inner
            })
            .inner;

        let escape = ctx.input(|input| input.key_pressed(egui::Key::Escape));
        DialogResponse {
            close_requested: overlay_clicked || escape,
            inner: Some(inner)
        }
    }
}
