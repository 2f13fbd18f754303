//! Board panel: appointment cards grouped by status.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use desk_core::board::AppointmentBoard;
use desk_types::appointment::Appointment;
use crate::theme::*;

/// What the caller should do after rendering the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    None,
    /// The user asked to cancel the appointment with this id
    Cancel(String),
}

/// Render the board. Shows a spinner until the first load resolves.
pub fn board_panel(ui: &mut egui::Ui, board: &AppointmentBoard) -> BoardAction {
    if board.is_loading() {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(50.0);
            ui.add(egui::Spinner::new().size(32.0));
        });
        return BoardAction::None;
    }

    let mut action = BoardAction::None;
    let groups = board.groups();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.heading(RichText::new("Dashboard").color(TEXT_PRIMARY).strong());
            ui.add_space(8.0);

            section_title(ui, "In Progress Appointments");
            card_grid(ui, &groups.in_progress, &mut action);

            ui.add_space(12.0);

            section_title(ui, "Completed Appointments");
            card_grid(ui, &groups.completed, &mut action);
        });

    action
}

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).color(TEXT_PRIMARY).strong().size(18.0));
    ui.add_space(6.0);
}

fn card_grid(ui: &mut egui::Ui, appointments: &[&Appointment], action: &mut BoardAction) {
    if appointments.is_empty() {
        ui.label(RichText::new("Nothing here.").color(TEXT_SECONDARY).italics());
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for appt in appointments {
            if appointment_card(ui, appt) {
                log::debug!("Cancel requested for appointment {}", appt.id);
                *action = BoardAction::Cancel(appt.id.clone());
            }
        }
    });
}

/// Returns true when the card's cancel button was clicked.
fn appointment_card(ui: &mut egui::Ui, appt: &Appointment) -> bool {
    let mut cancel_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(RichText::new(&appt.service_name).color(TEXT_PRIMARY).strong());
                ui.separator();
                for (name, value) in card_fields(appt) {
                    field(ui, name, &value);
                }
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Status:").color(TEXT_SECONDARY).strong());
                    status_tag(ui, appt);
                });

                if appt.is_cancellable() {
                    ui.add_space(6.0);
                    let btn = ui.add(
                        egui::Button::new(RichText::new("Cancel Appointment").color(TEXT_PRIMARY))
                            .fill(ERROR)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(CARD_WIDTH, 28.0)),
                    );
                    cancel_clicked = btn.clicked();
                }
            });
        });

    cancel_clicked
}

/// Labelled rows shown under a card's title, in display order.
pub fn card_fields(appt: &Appointment) -> Vec<(&'static str, String)> {
    vec![
        ("Appointment", appt.local_time_label()),
        ("Technician", appt.technician.clone()),
        ("Phone", appt.contact.phone_label().to_string()),
        ("Email", appt.contact.email_label().to_string()),
    ]
}

fn field(ui: &mut egui::Ui, name: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{}:", name)).color(TEXT_SECONDARY).strong());
        ui.label(RichText::new(value).color(TEXT_PRIMARY));
    });
}

fn status_tag(ui: &mut egui::Ui, appt: &Appointment) {
    let color = status_color(appt.status);
    egui::Frame::default()
        .fill(color.linear_multiply(0.25))
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(Vec2::new(6.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(appt.status.label()).color(color).small());
        });
}
