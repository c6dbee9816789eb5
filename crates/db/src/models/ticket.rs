//! IT ticket entity model and DTOs.

use mdip_core::ranking::{self, STATUS_OPEN, STATUS_RESOLVED_DISPLAY};
use mdip_core::types::DbId;
use serde::Serialize;

use crate::error::DbError;
use crate::value::{FromRow, Row};

/// Full ticket row from the `it_tickets` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItTicket {
    pub id: DbId,
    pub title: String,
    pub priority: String,
    pub status: String,
    pub created_date: String,
}

impl ItTicket {
    /// Ordinal priority: low 1, medium 2, high 3, critical 4, otherwise 0.
    pub fn priority_level(&self) -> u8 {
        ranking::ordinal_level(&self.priority)
    }

    pub fn is_critical(&self) -> bool {
        ranking::is_critical(&self.priority)
    }

    pub fn is_resolved(&self) -> bool {
        ranking::is_resolved(&self.status)
    }

    pub fn is_open(&self) -> bool {
        ranking::is_open(&self.status)
    }

    /// A copy with a different status. Not persisted.
    pub fn with_status(&self, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..self.clone()
        }
    }

    /// A copy marked "Resolved". Not persisted; see `TicketRepo::close`.
    pub fn closed(&self) -> Self {
        self.with_status(STATUS_RESOLVED_DISPLAY)
    }
}

impl FromRow for ItTicket {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            title: row.string("title")?,
            priority: row.string("priority")?,
            status: row
                .opt_string("status")?
                .unwrap_or_else(|| STATUS_OPEN.to_string()),
            created_date: row.opt_string("created_date")?.unwrap_or_default(),
        })
    }
}

impl std::fmt::Display for ItTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ticket #{}: {} [{}] - {}",
            self.id,
            self.title,
            self.priority.to_uppercase(),
            self.status
        )
    }
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub title: String,
    pub priority: String,
    /// Initial status; stored as "Open" when `None`.
    pub status: Option<String>,
    pub created_date: Option<String>,
}

/// DTO for updating an existing ticket. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub created_date: Option<String>,
}

impl UpdateTicket {
    /// A patch that only changes the status.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(priority: &str, status: &str) -> ItTicket {
        ItTicket {
            id: 8,
            title: "VPN down".into(),
            priority: priority.into(),
            status: status.into(),
            created_date: "2024-11-02".into(),
        }
    }

    #[test]
    fn priority_levels_and_predicates() {
        let t = ticket("critical", "OPEN");
        assert_eq!(t.priority_level(), 4);
        assert!(t.is_critical());
        assert!(t.is_open());
        assert!(!t.is_resolved());
        assert_eq!(ticket("urgent", "Open").priority_level(), 0);
    }

    #[test]
    fn closed_copy_is_resolved() {
        let t = ticket("Low", "In Progress");
        let done = t.closed();
        assert!(done.is_resolved());
        assert!(!done.is_open());
        assert_eq!(t.status, "In Progress");
    }

    #[test]
    fn display_uppercases_priority() {
        assert_eq!(ticket("Medium", "Open").to_string(), "Ticket #8: VPN down [MEDIUM] - Open");
    }
}
