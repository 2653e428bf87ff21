//! Command-line front end for the airline registry.
//!
//! # Responsibility
//! - Map subcommands onto `airline_core` service operations.
//! - Print results as pretty JSON on stdout.
//!
//! # Invariants
//! - Business errors surface with their fixed message and a non-zero exit.
//! - Logging is only initialized when a log directory is configured.

use airline_core::db::open_db;
use airline_core::{
    default_log_level, init_logging, AirlineAirportService, AirlineDraft, AirlinePatch,
    AirlineService, Airport, AirportPatch, AirportService, SqliteAirlineRepository,
    SqliteAirportRepository,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "airline_registry.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "airline-cli", version, about = "Manage airlines, airports and their links")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "AIRLINE_DB", default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,
    /// trace|debug|info|warn|error. Defaults by build mode; needs --log-dir.
    #[arg(long, env = "AIRLINE_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, env = "AIRLINE_LOG_DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Airline CRUD.
    #[command(subcommand)]
    Airline(AirlineCommand),
    /// Airport CRUD.
    #[command(subcommand)]
    Airport(AirportCommand),
    /// Airline-airport associations.
    #[command(subcommand)]
    Link(LinkCommand),
}

#[derive(Debug, Subcommand)]
enum AirlineCommand {
    List,
    Get { id: Uuid },
    Create(AirlineFields),
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: AirlineUpdateFields,
    },
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
struct AirlineFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// ISO date, e.g. 1919-12-05.
    #[arg(long)]
    foundation_date: String,
    #[arg(long)]
    web_page: String,
}

#[derive(Debug, Args)]
struct AirlineUpdateFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    foundation_date: Option<String>,
    #[arg(long)]
    web_page: Option<String>,
}

#[derive(Debug, Subcommand)]
enum AirportCommand {
    List,
    Get { id: Uuid },
    Create(AirportFields),
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: AirportUpdateFields,
    },
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
struct AirportFields {
    #[arg(long)]
    name: String,
    /// Exactly three characters.
    #[arg(long)]
    code: String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    city: String,
}

#[derive(Debug, Args)]
struct AirportUpdateFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    city: Option<String>,
}

#[derive(Debug, Subcommand)]
enum LinkCommand {
    /// Link one airport to an airline.
    Add { airline_id: Uuid, airport_id: Uuid },
    /// Show one linked airport.
    Get { airline_id: Uuid, airport_id: Uuid },
    /// List the airports linked to an airline.
    List { airline_id: Uuid },
    /// Replace every link of an airline; no ids clears the set.
    Set {
        airline_id: Uuid,
        airport_ids: Vec<Uuid>,
    },
    /// Unlink one airport from an airline.
    Remove { airline_id: Uuid, airport_id: Uuid },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    info!("event=cli_start module=cli status=ok");

    match cli.command {
        Command::Airline(command) => run_airline(&conn, command),
        Command::Airport(command) => run_airport(&conn, command),
        Command::Link(command) => run_link(&conn, command),
    }
}

fn run_airline(conn: &Connection, command: AirlineCommand) -> Result<()> {
    let service = AirlineService::new(SqliteAirlineRepository::try_new(conn)?);

    match command {
        AirlineCommand::List => print_json(&service.find_all()?),
        AirlineCommand::Get { id } => print_json(&service.find_one(id)?),
        AirlineCommand::Create(fields) => {
            let draft = AirlineDraft {
                name: fields.name,
                description: fields.description,
                foundation_date: fields.foundation_date,
                web_page: fields.web_page,
            };
            print_json(&service.create(&draft)?)
        }
        AirlineCommand::Update { id, fields } => {
            let patch = AirlinePatch {
                name: fields.name,
                description: fields.description,
                foundation_date: fields.foundation_date,
                web_page: fields.web_page,
            };
            print_json(&service.update(id, &patch)?)
        }
        AirlineCommand::Delete { id } => {
            service.delete(id)?;
            Ok(())
        }
    }
}

fn run_airport(conn: &Connection, command: AirportCommand) -> Result<()> {
    let service = AirportService::new(SqliteAirportRepository::try_new(conn)?);

    match command {
        AirportCommand::List => print_json(&service.find_all()?),
        AirportCommand::Get { id } => print_json(&service.find_one(id)?),
        AirportCommand::Create(fields) => {
            let airport = Airport::new(fields.name, fields.code, fields.country, fields.city);
            print_json(&service.create(&airport)?)
        }
        AirportCommand::Update { id, fields } => {
            let patch = AirportPatch {
                name: fields.name,
                code: fields.code,
                country: fields.country,
                city: fields.city,
            };
            print_json(&service.update(id, &patch)?)
        }
        AirportCommand::Delete { id } => {
            service.delete(id)?;
            Ok(())
        }
    }
}

fn run_link(conn: &Connection, command: LinkCommand) -> Result<()> {
    let service = AirlineAirportService::new(
        SqliteAirlineRepository::try_new(conn)?,
        SqliteAirportRepository::try_new(conn)?,
    );

    match command {
        LinkCommand::Add {
            airline_id,
            airport_id,
        } => print_json(&service.add_airport_to_airline(airline_id, airport_id)?),
        LinkCommand::Get {
            airline_id,
            airport_id,
        } => print_json(&service.find_airport_from_airline(airline_id, airport_id)?),
        LinkCommand::List { airline_id } => {
            print_json(&service.find_airports_from_airline(airline_id)?)
        }
        LinkCommand::Set {
            airline_id,
            airport_ids,
        } => print_json(&service.update_airports_from_airline(airline_id, &airport_ids)?),
        LinkCommand::Remove {
            airline_id,
            airport_id,
        } => {
            service.delete_airport_from_airline(airline_id, airport_id)?;
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
