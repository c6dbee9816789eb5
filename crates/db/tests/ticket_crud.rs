//! Integration tests for ticket repository operations.

use mdip_db::models::ticket::{CreateTicket, ItTicket, UpdateTicket};
use mdip_db::repositories::TicketRepo;
use mdip_db::schema::ensure_schema;
use mdip_db::Gateway;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> Gateway {
    let db = Gateway::open_in_memory().unwrap();
    ensure_schema(&db).unwrap();
    db
}

fn create(db: &Gateway, input: CreateTicket) -> i64 {
    TicketRepo::create(db, &input).unwrap()
}

fn ids(tickets: Vec<ItTicket>) -> Vec<i64> {
    tickets.iter().map(|t| t.id).collect()
}

fn new_ticket(title: &str, priority: &str, status: Option<&str>) -> CreateTicket {
    CreateTicket {
        title: title.to_string(),
        priority: priority.to_string(),
        status: status.map(str::to_string),
        created_date: Some("2024-11-02".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_create_defaults_status_to_open() {
    let db = setup();
    let id = TicketRepo::create(&db, &new_ticket("Email outage", "High", None)).unwrap();

    let ticket = TicketRepo::find_by_id(&db, id).unwrap().unwrap();
    assert_eq!(ticket.status, "Open");
    assert!(ticket.is_open());
    assert_eq!(ticket.priority_level(), 3);
    assert_eq!(ticket.created_date, "2024-11-02");
}

#[test]
fn test_close_resolves_ticket() {
    let db = setup();
    let id = TicketRepo::create(&db, &new_ticket("Broken monitor", "Low", None)).unwrap();

    assert_eq!(TicketRepo::close(&db, id).unwrap(), 1);

    let ticket = TicketRepo::find_by_id(&db, id).unwrap().unwrap();
    assert!(ticket.is_resolved());
    assert_eq!(ticket.status, "Resolved");
    assert_eq!(TicketRepo::close(&db, 12345).unwrap(), 0);
}

#[test]
fn test_status_filters() {
    let db = setup();
    let open_critical = create(&db, new_ticket("Server down", "Critical", None));
    let in_progress = create(&db, new_ticket("Slow wifi", "Medium", Some("In Progress")));
    let resolved = create(&db, new_ticket("Password", "critical", Some("Resolved")));

    assert_eq!(ids(TicketRepo::list_open(&db).unwrap()), vec![open_critical]);
    assert_eq!(
        ids(TicketRepo::list_critical(&db).unwrap()),
        vec![resolved, open_critical]
    );
    assert_eq!(
        ids(TicketRepo::list_unresolved(&db).unwrap()),
        vec![in_progress, open_critical]
    );
}

#[test]
fn test_patch_title_only() {
    let db = setup();
    let id = TicketRepo::create(&db, &new_ticket("Typo", "Low", None)).unwrap();

    let patch = UpdateTicket {
        title: Some("Fixed title".to_string()),
        ..UpdateTicket::default()
    };
    assert_eq!(TicketRepo::update(&db, id, &patch).unwrap(), 1);

    let ticket = TicketRepo::find_by_id(&db, id).unwrap().unwrap();
    assert_eq!(ticket.title, "Fixed title");
    assert_eq!(ticket.priority, "Low");
    assert_eq!(ticket.status, "Open");
}

#[test]
fn test_delete_and_empty_patch() {
    let db = setup();
    let id = TicketRepo::create(&db, &new_ticket("Old", "Low", None)).unwrap();
    assert_eq!(TicketRepo::update(&db, id, &UpdateTicket::default()).unwrap(), 0);
    assert_eq!(TicketRepo::delete(&db, id).unwrap(), 1);
    assert!(TicketRepo::find_by_id(&db, id).unwrap().is_none());
}
