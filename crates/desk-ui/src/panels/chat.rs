//! Chat panel: transcript, busy indicator and message input.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use desk_core::chat::ChatSession;
use desk_types::chat::{ChatMessage, Sender};
use crate::state::UiState;
use crate::theme::*;

/// Enter submits unless Shift is held; Shift+Enter inserts a newline.
pub fn is_submit_chord(modifiers: egui::Modifiers) -> bool {
    !modifiers.shift
}

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, session: &ChatSession, state: &mut UiState) -> Option<String> {
    let mut submitted = None;
    let busy = session.is_busy();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading(RichText::new("Chat Interface").color(TEXT_PRIMARY).strong());
                ui.separator();

                // Transcript
                let available_height = ui.available_height() - 90.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in session.messages() {
                            let align = match message.sender {
                                Sender::You => Align::Max,
                                Sender::Agent => Align::Min,
                            };
                            ui.with_layout(Layout::top_down(align), |ui| {
                                render_message(ui, message);
                            });
                            ui.add_space(4.0);
                        }
                        if state.transcript_changed(session.messages().len()) {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                if busy {
                    ui.add(egui::Spinner::new());
                }

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input_id = ui.make_persistent_id("chat_input");

                    // Claim a plain Enter before the text edit turns it into a newline
                    let enter_pressed = ui.memory(|m| m.has_focus(input_id))
                        && ui.input_mut(|i| {
                            let modifiers = i.modifiers;
                            is_submit_chord(modifiers) && i.consume_key(modifiers, egui::Key::Enter)
                        });

                    let input = egui::TextEdit::multiline(&mut state.input_text)
                        .id(input_id)
                        .hint_text("Type a message...")
                        .desired_rows(1)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_btn = ui.add_enabled(
                        !busy,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if busy { BG_SURFACE } else { ACCENT })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let can_send = !busy && !state.input_text.trim().is_empty();
                    if (enter_pressed || send_btn.clicked()) && can_send {
                        submitted = Some(std::mem::take(&mut state.input_text));
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let label_color = match message.sender {
        Sender::You => ACCENT,
        Sender::Agent => SUCCESS,
    };

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("{}:", message.sender.label()))
                    .color(label_color)
                    .strong()
                    .small(),
            );
            ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));
        });
}
