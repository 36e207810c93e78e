use std::fs;

use clap::Parser;
use cli::{Args, Commands};
use error::{CliError, CliResult, ErrorContext};
use logging::setup_logging;
use rowkit_config::{
    config::{self, generate_default_config, get_config, set_config_path, Config},
    paths::resolve_path,
};
use rowkit_db::{create_connection, probe_in_memory, schema::create_all, DbConnection};
use tracing::{debug, info};
use utils::set_color;

mod cli;
mod error;
mod logging;
mod output;
mod project;
mod query;
mod utils;
mod weather;

fn open_database(args: &Args, config: &Config) -> CliResult<DbConnection> {
    let path = match args.db {
        Some(ref db) => resolve_path(db)?,
        None => config.get_db_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let db = create_connection(&path)
        .ok_or_else(|| CliError::DatabaseUnavailable(path.display().to_string()))?;

    if config.foreign_keys() {
        db.enable_foreign_keys()?;
        debug!("foreign key enforcement enabled");
    }

    Ok(db)
}

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if let Some(ref c) = args.config {
        set_config_path(resolve_path(c)?);
    }

    match args.command {
        Commands::DefConfig => return Ok(generate_default_config()?),
        Commands::Probe => return probe(args.json),
        _ => {}
    }

    config::init()?;
    let config = get_config();
    let db = open_database(&args, &config)?;
    let label = db_label(args.db.as_deref(), &config);

    match args.command {
        Commands::Init => {
            create_all(&db)?;
            info!("Created tables in {label}");
        }
        Commands::Project {
            action,
        } => project::handle_project(&db, action)?,
        Commands::Task {
            action,
        } => project::handle_task(&db, action, args.json)?,
        Commands::Select {
            table,
            filters,
            limit,
        } => query::select_rows(&db, &table, &filters, limit, args.json)?,
        Commands::Update {
            table,
            id,
            assignments,
        } => query::update_row(&db, &table, id, &assignments)?,
        Commands::Delete {
            table,
            filters,
        } => query::delete_rows(&db, &table, &filters)?,
        Commands::Purge {
            table,
        } => query::purge_table(&db, &table)?,
        Commands::Weather {
            action,
        } => weather::handle_weather(&db, &config, action, args.json)?,
        Commands::DefConfig | Commands::Probe => {}
    }

    db.commit()?;
    debug!("committed changes to {label}");

    Ok(())
}

fn probe(json: bool) -> CliResult<()> {
    let version =
        probe_in_memory().ok_or_else(|| CliError::DatabaseUnavailable(":memory:".into()))?;
    if json {
        println!("{}", serde_json::json!({ "sqlite_version": version }));
    }
    Ok(())
}

fn db_label(db_arg: Option<&str>, config: &Config) -> String {
    db_arg
        .and_then(|p| resolve_path(p).ok())
        .or_else(|| config.get_db_path().ok())
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
