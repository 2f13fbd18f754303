use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, AppointmentStatus, Contact};

/// Top-level desk configuration, injected at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Base URL of the ticketing backend, without trailing slash
    pub api_base: String,
    /// Shown whenever the ticket list is empty or cannot be read
    pub fallback_appointments: Vec<Appointment>,
    /// How long a toast stays on screen
    pub notice_ttl_secs: f64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            fallback_appointments: demo_appointments(),
            notice_ttl_secs: 3.0,
        }
    }
}

impl DeskConfig {
    /// Base URL with any trailing slashes removed
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

const DEFAULT_API_BASE: &str = "http://13.201.194.231:3000";

/// Demonstration dataset used in place of an empty board.
pub fn demo_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "mock-1".to_string(),
            service_name: "AC Repair".to_string(),
            appointment_time: "2024-02-22T10:00:00Z".to_string(),
            technician: "John Doe".to_string(),
            contact: Contact::new("123-456-7890", "john@example.com"),
            status: AppointmentStatus::InProgress,
        },
        Appointment {
            id: "mock-2".to_string(),
            service_name: "Plumbing Fix".to_string(),
            appointment_time: "2024-02-21T14:30:00Z".to_string(),
            technician: "Jane Smith".to_string(),
            contact: Contact::new("987-654-3210", "jane@example.com"),
            status: AppointmentStatus::Completed,
        },
    ]
}
