//! Repository for the `it_tickets` table.

use mdip_core::ranking::STATUS_RESOLVED_DISPLAY;
use mdip_core::types::DbId;

use super::{apply_patch, delete_by_id, fetch_all_as, fetch_optional_as, inserted_id, Assignments};
use crate::error::DbError;
use crate::gateway::Gateway;
use crate::models::ticket::{CreateTicket, ItTicket, UpdateTicket};
use crate::schema::Table;
use crate::value::SqlValue;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, priority, status, created_date";

/// Status given to tickets created without one.
const DEFAULT_STATUS: &str = "Open";

/// Provides CRUD operations for IT tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning its id.
    pub fn create(db: &Gateway, input: &CreateTicket) -> Result<DbId, DbError> {
        let id = inserted_id(
            db,
            "INSERT INTO it_tickets (title, priority, status, created_date)
             VALUES (?, ?, ?, ?)",
            &[
                SqlValue::from(&input.title),
                SqlValue::from(&input.priority),
                SqlValue::from(input.status.as_deref().unwrap_or(DEFAULT_STATUS)),
                SqlValue::from(input.created_date.as_deref()),
            ],
        )?;
        tracing::debug!(id, priority = %input.priority, "Ticket created");
        Ok(id)
    }

    /// List all tickets, newest id first.
    pub fn list(db: &Gateway) -> Result<Vec<ItTicket>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM it_tickets ORDER BY id DESC");
        fetch_all_as(db, &query, &[])
    }

    /// Find a ticket by id.
    pub fn find_by_id(db: &Gateway, id: DbId) -> Result<Option<ItTicket>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM it_tickets WHERE id = ?");
        fetch_optional_as(db, &query, &[SqlValue::Integer(id)])
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    pub fn update(db: &Gateway, id: DbId, input: &UpdateTicket) -> Result<u64, DbError> {
        let assignments = Assignments::new()
            .set("title", input.title.as_deref())
            .set("priority", input.priority.as_deref())
            .set("status", input.status.as_deref())
            .set("created_date", input.created_date.as_deref());
        apply_patch(db, Table::ItTickets, id, assignments)
    }

    /// Set only the status column.
    pub fn update_status(db: &Gateway, id: DbId, status: &str) -> Result<u64, DbError> {
        Self::update(db, id, &UpdateTicket::status(status))
    }

    /// Mark a ticket "Resolved".
    pub fn close(db: &Gateway, id: DbId) -> Result<u64, DbError> {
        Self::update_status(db, id, STATUS_RESOLVED_DISPLAY)
    }

    /// Permanently delete a ticket. Returns rows removed (0 or 1).
    pub fn delete(db: &Gateway, id: DbId) -> Result<u64, DbError> {
        delete_by_id(db, Table::ItTickets, id)
    }

    /// Tickets whose status is open.
    pub fn list_open(db: &Gateway) -> Result<Vec<ItTicket>, DbError> {
        Ok(Self::list(db)?.into_iter().filter(ItTicket::is_open).collect())
    }

    /// Tickets whose priority is critical.
    pub fn list_critical(db: &Gateway) -> Result<Vec<ItTicket>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(ItTicket::is_critical)
            .collect())
    }

    /// Tickets not yet resolved.
    pub fn list_unresolved(db: &Gateway) -> Result<Vec<ItTicket>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(|ticket| !ticket.is_resolved())
            .collect())
    }
}
