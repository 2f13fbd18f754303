//! Main egui application: dashboard on the left, chat on the right.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use desk_core::board::{self, AppointmentBoard};
use desk_core::chat::{self as chat_core, ChatSession};
use desk_core::event_bus::EventBus;
use desk_platform::HttpBackend;
use desk_types::config::DeskConfig;
use desk_ui::panels::board::{board_panel, BoardAction};
use desk_ui::panels::chat::chat_panel;
use desk_ui::panels::toast::toast_overlay;
use desk_ui::state::UiState;
use desk_ui::theme;

const TOAST_REPAINT: Duration = Duration::from_millis(250);

pub struct DeskApp {
    ui_state: UiState,
    config: DeskConfig,
    event_bus: EventBus,
    board: Rc<RefCell<AppointmentBoard>>,
    chat: Rc<RefCell<ChatSession>>,
    backend: Rc<HttpBackend>,
    first_frame: bool,
}

impl DeskApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = DeskConfig::default();
        let event_bus = EventBus::new();
        let board = AppointmentBoard::new(config.fallback_appointments.clone(), event_bus.clone());
        let chat = ChatSession::new(event_bus.clone());
        let backend = HttpBackend::new(config.base_url());
        log::info!("Backend at {}", backend.base_url());

        Self {
            ui_state: UiState::new(config.notice_ttl_secs),
            config,
            event_bus,
            board: Rc::new(RefCell::new(board)),
            chat: Rc::new(RefCell::new(chat)),
            backend: Rc::new(backend),
            first_frame: true,
        }
    }

    /// Fetch the ticket list (async). Overlapping loads are sequenced by the board.
    fn dispatch_load(&self, ctx: &egui::Context) {
        let board = self.board.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = board::load_appointments(&board, backend.as_ref()).await;
            log::debug!("Ticket load finished: {:?}", outcome);
            ctx.request_repaint();
        });
    }

    fn dispatch_cancel(&self, id: String, ctx: &egui::Context) {
        let board = self.board.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            board::cancel_appointment(&board, backend.as_ref(), &id).await;
            ctx.request_repaint();
        });
    }

    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let chat = self.chat.clone();
        let backend = self.backend.clone();
        let task_ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if !chat_core::send_message(&chat, backend.as_ref(), &text).await {
                log::debug!("Message not sent");
            }
            task_ctx.request_repaint();
        });
        // Show the optimistic message and spinner right away
        ctx.request_repaint();
    }
}

impl eframe::App for DeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.dispatch_load(ctx);
            self.first_frame = false;
        }

        let now = ctx.input(|i| i.time);

        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain(), now);
            ctx.request_repaint();
        }

        if self.ui_state.take_refresh() {
            log::info!("Ticket changed, reloading appointments");
            self.dispatch_load(ctx);
        }

        self.ui_state.prune_toasts(now);
        if !self.ui_state.toasts.is_empty() {
            ctx.request_repaint_after(TOAST_REPAINT);
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Service Desk")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("Backend: {}", self.config.base_url()))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
            });
        });

        // ── Chat side panel ──────────────────────────────────
        let submitted = SidePanel::right("chat_panel")
            .default_width(400.0)
            .min_width(320.0)
            .show(ctx, |ui| {
                let session = self.chat.borrow();
                chat_panel(ui, &session, &mut self.ui_state)
            })
            .inner;
        if let Some(text) = submitted {
            self.dispatch_message(text, ctx);
        }

        // ── Dashboard ────────────────────────────────────────
        let action = CentralPanel::default()
            .show(ctx, |ui| board_panel(ui, &self.board.borrow()))
            .inner;
        if let BoardAction::Cancel(id) = action {
            self.dispatch_cancel(id, ctx);
        }

        toast_overlay(ctx, &self.ui_state);
    }
}
