//! Toast overlay: transient success and error notices.

use egui::{self, Align2, RichText};
use crate::state::UiState;
use crate::theme::*;

pub fn toast_overlay(ctx: &egui::Context, state: &UiState) {
    if state.toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(Align2::CENTER_TOP, [0.0, 16.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in &state.toasts {
                let color = notice_color(toast.level);
                egui::Frame::default()
                    .fill(BG_SURFACE)
                    .stroke(egui::Stroke::new(1.0, color))
                    .corner_radius(PANEL_ROUNDING)
                    .inner_margin(PANEL_PADDING)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&toast.message).color(color));
                    });
                ui.add_space(4.0);
            }
        });
}
