use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;

/// Lifecycle status of an appointment.
///
/// The ticket mapping only ever yields `InProgress` or `Completed`;
/// `Scheduled` and `Cancelled` are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn from_open_flag(is_open: bool) -> Self {
        if is_open {
            AppointmentStatus::InProgress
        } else {
            AppointmentStatus::Completed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Contact details for the technician, shown as "N/A" when unset.
/// The backend does not supply these yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    pub fn new(phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            email: Some(email.into()),
        }
    }

    pub fn phone_label(&self) -> &str {
        self.phone.as_deref().unwrap_or("N/A")
    }

    pub fn email_label(&self) -> &str {
        self.email.as_deref().unwrap_or("N/A")
    }
}

/// View model shown on the board, derived from a backend [`Ticket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub service_name: String,
    /// Timestamp as sent by the backend (RFC 3339 when well-formed)
    pub appointment_time: String,
    pub technician: String,
    pub contact: Contact,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Appointment time in the viewer's local timezone.
    /// Falls back to the raw text when the timestamp does not parse.
    pub fn local_time_label(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.appointment_time) {
            Ok(dt) => dt
                .with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string(),
            Err(_) => self.appointment_time.clone(),
        }
    }

    pub fn is_cancellable(&self) -> bool {
        self.status == AppointmentStatus::InProgress
    }
}

impl From<Ticket> for Appointment {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            service_name: ticket.issue,
            appointment_time: ticket.time,
            technician: ticket.name,
            contact: Contact::default(),
            status: AppointmentStatus::from_open_flag(ticket.is_open),
        }
    }
}
