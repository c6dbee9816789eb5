//! Subcommand definitions and handlers.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use mdip_auth::AuthService;
use mdip_core::error::CoreError;
use mdip_core::types::DbId;
use mdip_core::validation::{validate_dataset_size, validate_required};
use mdip_db::models::dataset::{CreateDataset, Dataset};
use mdip_db::models::incident::{CreateIncident, SecurityIncident};
use mdip_db::models::ticket::{CreateTicket, ItTicket};
use mdip_db::models::LabelCount;
use mdip_db::repositories::{DatasetRepo, IncidentRepo, TicketRepo};
use mdip_db::schema::table_summary;
use mdip_db::Gateway;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "mdip")]
#[command(about = "Multi-domain intelligence platform: incidents, datasets and IT tickets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create missing tables and show row counts
    Init,
    /// Register a new account
    Register(Credentials),
    /// Check a username and password
    Login(Credentials),
    /// Cybersecurity incidents
    Incidents(IncidentCommand),
    /// Dataset metadata
    Datasets(DatasetCommand),
    /// IT support tickets
    Tickets(TicketCommand),
}

#[derive(Debug, Args)]
pub struct Credentials {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub password: String,
    /// Role for a new account
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Debug, Args)]
pub struct IncidentCommand {
    #[command(subcommand)]
    pub command: IncidentSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum IncidentSubcommand {
    /// List incidents, newest first
    List {
        #[arg(long)]
        critical: bool,
        #[arg(long, conflicts_with = "critical")]
        unresolved: bool,
    },
    /// Record a new incident
    Add {
        #[arg(long)]
        date: String,
        #[arg(long = "type")]
        incident_type: String,
        #[arg(long)]
        severity: String,
        #[arg(long, default_value = "Open")]
        status: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        reported_by: Option<String>,
    },
    /// Change an incident's status
    SetStatus { id: DbId, status: String },
    /// Delete an incident
    Delete { id: DbId },
    /// Counts by type and the status breakdown for one severity
    Stats {
        #[arg(long, default_value = "High")]
        severity: String,
        /// Only show types with more than this many incidents
        #[arg(long, default_value_t = 0)]
        min_count: i64,
    },
}

#[derive(Debug, Args)]
pub struct DatasetCommand {
    #[command(subcommand)]
    pub command: DatasetSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum DatasetSubcommand {
    /// List datasets, newest first
    List {
        #[arg(long)]
        large: bool,
        #[arg(long, conflicts_with = "large")]
        category: Option<String>,
    },
    /// Record a new dataset
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Size in megabytes
        #[arg(long)]
        size: Option<i64>,
    },
    /// Delete a dataset
    Delete { id: DbId },
}

#[derive(Debug, Args)]
pub struct TicketCommand {
    #[command(subcommand)]
    pub command: TicketSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum TicketSubcommand {
    /// List tickets, newest first
    List {
        #[arg(long)]
        open: bool,
        #[arg(long, conflicts_with = "open")]
        critical: bool,
        #[arg(long, conflicts_with_all = ["open", "critical"])]
        unresolved: bool,
    },
    /// Open a new ticket
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        priority: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        created_date: Option<String>,
    },
    /// Mark a ticket resolved
    Close { id: DbId },
    /// Delete a ticket
    Delete { id: DbId },
}

/// Dispatch the parsed command.
pub fn run(cli: &Cli, db: &Gateway, config: &AppConfig) -> anyhow::Result<()> {
    let out = Output { json: cli.json };
    match &cli.command {
        Command::Init => {
            let summary = table_summary(db)?;
            if out.json {
                let map: serde_json::Map<String, serde_json::Value> = summary
                    .iter()
                    .map(|(table, count)| (table.name().to_string(), (*count).into()))
                    .collect();
                out.json_value(&map)
            } else {
                for (table, count) in summary {
                    println!("{:<20} {count} rows", table.name());
                }
                Ok(())
            }
        }
        Command::Register(creds) => {
            let auth = AuthService::new(db, config.password);
            let id = auth.register(&creds.username, &creds.password, creds.role.as_deref())?;
            out.done(&format!("Registered '{}' with id {id}.", creds.username))
        }
        Command::Login(creds) => {
            let auth = AuthService::new(db, config.password);
            let user = auth.login(&creds.username, &creds.password)?;
            if out.json {
                out.json_value(&user)
            } else {
                println!("Welcome, {}! Role: {}", user.username, user.role);
                Ok(())
            }
        }
        Command::Incidents(cmd) => run_incidents(&cmd.command, db, out),
        Command::Datasets(cmd) => run_datasets(&cmd.command, db, out),
        Command::Tickets(cmd) => run_tickets(&cmd.command, db, out),
    }
}

fn run_incidents(cmd: &IncidentSubcommand, db: &Gateway, out: Output) -> anyhow::Result<()> {
    match cmd {
        IncidentSubcommand::List {
            critical,
            unresolved,
        } => {
            let incidents = if *critical {
                IncidentRepo::list_critical(db)?
            } else if *unresolved {
                IncidentRepo::list_unresolved(db)?
            } else {
                IncidentRepo::list(db)?
            };
            out.records::<SecurityIncident>(&incidents)
        }
        IncidentSubcommand::Add {
            date,
            incident_type,
            severity,
            status,
            description,
            reported_by,
        } => {
            validate_required("Severity", severity)?;
            let id = IncidentRepo::create(
                db,
                &CreateIncident {
                    date: date.clone(),
                    incident_type: incident_type.clone(),
                    severity: severity.clone(),
                    status: status.clone(),
                    description: description.clone(),
                    reported_by: reported_by.clone(),
                },
            )?;
            out.done(&format!("Incident #{id} recorded."))
        }
        IncidentSubcommand::SetStatus { id, status } => {
            let rows = IncidentRepo::update_status(db, *id, status)?;
            expect_row(rows, "Incident", *id)?;
            out.done(&format!("Incident #{id} is now '{status}'."))
        }
        IncidentSubcommand::Delete { id } => {
            expect_row(IncidentRepo::delete(db, *id)?, "Incident", *id)?;
            out.done(&format!("Incident #{id} deleted."))
        }
        IncidentSubcommand::Stats {
            severity,
            min_count,
        } => {
            let by_type = if *min_count > 0 {
                IncidentRepo::types_with_more_than(db, *min_count)?
            } else {
                IncidentRepo::count_by_type(db)?
            };
            let by_status = IncidentRepo::count_by_status_for_severity(db, severity)?;
            if out.json {
                return out.json_value(&serde_json::json!({
                    "by_type": by_type,
                    "by_status": { "severity": severity, "counts": by_status },
                }));
            }
            println!("Incidents by type:");
            print_counts(&by_type);
            println!("{severity} severity incidents by status:");
            print_counts(&by_status);
            Ok(())
        }
    }
}

fn run_datasets(cmd: &DatasetSubcommand, db: &Gateway, out: Output) -> anyhow::Result<()> {
    match cmd {
        DatasetSubcommand::List { large, category } => {
            let datasets = match (large, category) {
                (true, _) => DatasetRepo::list_large(db)?,
                (false, Some(category)) => DatasetRepo::list_by_category(db, category)?,
                (false, None) => DatasetRepo::list(db)?,
            };
            out.records::<Dataset>(&datasets)?;
            if !out.json {
                let total: i64 = datasets.iter().map(|d| d.size).sum();
                println!("{} datasets, {total} MB total", datasets.len());
            }
            Ok(())
        }
        DatasetSubcommand::Add {
            name,
            source,
            category,
            size,
        } => {
            validate_required("Name", name)?;
            if let Some(size) = size {
                validate_dataset_size(*size)?;
            }
            let id = DatasetRepo::create(
                db,
                &CreateDataset {
                    name: name.clone(),
                    source: source.clone(),
                    category: category.clone(),
                    size: *size,
                },
            )?;
            out.done(&format!("Dataset #{id} recorded."))
        }
        DatasetSubcommand::Delete { id } => {
            expect_row(DatasetRepo::delete(db, *id)?, "Dataset", *id)?;
            out.done(&format!("Dataset #{id} deleted."))
        }
    }
}

fn run_tickets(cmd: &TicketSubcommand, db: &Gateway, out: Output) -> anyhow::Result<()> {
    match cmd {
        TicketSubcommand::List {
            open,
            critical,
            unresolved,
        } => {
            let tickets = if *open {
                TicketRepo::list_open(db)?
            } else if *critical {
                TicketRepo::list_critical(db)?
            } else if *unresolved {
                TicketRepo::list_unresolved(db)?
            } else {
                TicketRepo::list(db)?
            };
            out.records::<ItTicket>(&tickets)
        }
        TicketSubcommand::Add {
            title,
            priority,
            status,
            created_date,
        } => {
            validate_required("Title", title)?;
            validate_required("Priority", priority)?;
            let id = TicketRepo::create(
                db,
                &CreateTicket {
                    title: title.clone(),
                    priority: priority.clone(),
                    status: status.clone(),
                    created_date: created_date.clone(),
                },
            )?;
            out.done(&format!("Ticket #{id} opened."))
        }
        TicketSubcommand::Close { id } => {
            expect_row(TicketRepo::close(db, *id)?, "Ticket", *id)?;
            out.done(&format!("Ticket #{id} resolved."))
        }
        TicketSubcommand::Delete { id } => {
            expect_row(TicketRepo::delete(db, *id)?, "Ticket", *id)?;
            out.done(&format!("Ticket #{id} deleted."))
        }
    }
}

/* --------------------------------------------------------------------------
Output helpers
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn json_value<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
        println!("{text}");
        Ok(())
    }

    fn records<T: Serialize + std::fmt::Display>(&self, records: &[T]) -> anyhow::Result<()> {
        if self.json {
            return self.json_value(records);
        }
        if records.is_empty() {
            println!("No records.");
        }
        for record in records {
            println!("{record}");
        }
        Ok(())
    }

    fn done(&self, message: &str) -> anyhow::Result<()> {
        if self.json {
            self.json_value(&serde_json::json!({ "message": message }))
        } else {
            println!("{message}");
            Ok(())
        }
    }
}

fn print_counts(counts: &[LabelCount]) {
    if counts.is_empty() {
        println!("  (none)");
    }
    for LabelCount { label, count } in counts {
        println!("  {label:<24} {count}");
    }
}

fn expect_row(rows: u64, entity: &'static str, id: DbId) -> Result<(), CoreError> {
    if rows == 0 {
        return Err(CoreError::NotFound { entity, id });
    }
    Ok(())
}
