//! Appointment board: the ticket list shown on the dashboard.
//!
//! Every network operation is split in two synchronous halves around the
//! awaited port call (`begin_load`/`finish_load`, `finish_cancel`), so the
//! board can sit in an `Rc<RefCell<_>>` without a borrow living across an
//! `.await`. The async drivers at the bottom of this module do the wiring.

use std::cell::RefCell;

use desk_types::{
    Result,
    appointment::{Appointment, AppointmentStatus},
    event::NoticeLevel,
    ticket::TicketList,
};
use crate::event_bus::EventBus;
use crate::ports::TicketPort;

pub const CANCEL_SUCCESS: &str = "Appointment canceled successfully!";
pub const CANCEL_FAILURE: &str = "Failed to cancel appointment. Please try again.";

/// Identifies one issued load. Later loads compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadToken(u64);

/// How a finished load was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Backend tickets replaced the list
    Loaded(usize),
    /// Empty, malformed or failed read; the fallback set was shown
    Fallback,
    /// A newer load was issued meanwhile; this result was dropped
    Stale,
}

/// The two groups the board displays, in display order.
#[derive(Debug, Default)]
pub struct BoardGroups<'a> {
    pub in_progress: Vec<&'a Appointment>,
    pub completed: Vec<&'a Appointment>,
}

pub struct AppointmentBoard {
    appointments: Vec<Appointment>,
    fallback: Vec<Appointment>,
    loading: bool,
    latest_load: u64,
    event_bus: EventBus,
}

impl AppointmentBoard {
    pub fn new(fallback: Vec<Appointment>, event_bus: EventBus) -> Self {
        Self {
            appointments: Vec::new(),
            fallback,
            loading: true,
            latest_load: 0,
            event_bus,
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// True until the first load resolves. Later reloads run silently.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> LoadToken {
        self.latest_load += 1;
        LoadToken(self.latest_load)
    }

    /// Apply the result of the load identified by `token`.
    pub fn finish_load(&mut self, token: LoadToken, result: Result<TicketList>) -> LoadOutcome {
        if token.0 < self.latest_load {
            log::debug!(
                "Dropping stale ticket load #{} (latest #{})",
                token.0,
                self.latest_load
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(list) => match list.into_non_empty() {
                Some(tickets) => {
                    self.appointments = tickets.into_iter().map(Appointment::from).collect();
                    LoadOutcome::Loaded(self.appointments.len())
                }
                None => {
                    log::warn!("Ticket list was empty. Showing demo appointments.");
                    self.use_fallback()
                }
            },
            Err(e) => {
                log::error!("Failed to load tickets: {}", e);
                self.use_fallback()
            }
        }
    }

    fn use_fallback(&mut self) -> LoadOutcome {
        self.appointments = self.fallback.clone();
        LoadOutcome::Fallback
    }

    /// Apply the result of deleting appointment `id`.
    /// Returns true when the appointment was removed.
    pub fn finish_cancel(&mut self, id: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.appointments.retain(|a| a.id != id);
                self.event_bus.notify(NoticeLevel::Success, CANCEL_SUCCESS);
                true
            }
            Err(e) => {
                log::error!("Failed to cancel appointment {}: {}", id, e);
                self.event_bus.notify(NoticeLevel::Error, CANCEL_FAILURE);
                false
            }
        }
    }

    /// Split the list into the displayed groups. Scheduled and cancelled
    /// appointments belong to neither and are not shown.
    pub fn groups(&self) -> BoardGroups<'_> {
        let mut groups = BoardGroups::default();
        for appt in &self.appointments {
            match appt.status {
                AppointmentStatus::InProgress => groups.in_progress.push(appt),
                AppointmentStatus::Completed => groups.completed.push(appt),
                AppointmentStatus::Scheduled | AppointmentStatus::Cancelled => {}
            }
        }
        groups
    }
}

// ─── Async drivers ───────────────────────────────────────────

/// Fetch the ticket list and apply it to the board.
pub async fn load_appointments(board: &RefCell<AppointmentBoard>, port: &dyn TicketPort) -> LoadOutcome {
    let token = board.borrow_mut().begin_load();
    let result = port.list_tickets().await;
    board.borrow_mut().finish_load(token, result)
}

/// Delete an appointment on the backend, then drop it locally.
pub async fn cancel_appointment(
    board: &RefCell<AppointmentBoard>,
    port: &dyn TicketPort,
    id: &str,
) -> bool {
    let result = port.delete_ticket(id).await;
    board.borrow_mut().finish_cancel(id, result)
}
