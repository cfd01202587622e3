use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use nestegg::config::Config;
use nestegg::date_utils::ReportRange;
use nestegg::db::{create_pool, migrations, DbPool};
use nestegg::error::{AppError, AppResult};
use nestegg::services::budget;
use nestegg::services::entry_file::{parse_entry_file, EntrySheet};
use nestegg::services::report::{self, FileReportSink, ReportSink};

#[derive(Parser)]
#[command(
    name = "nestegg",
    version,
    about = "Personal budgeting calculator: frequency-normalized totals and snapshot reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute totals from an entries file and optionally save a snapshot
    Budget {
        /// CSV entries file (section,label,amount,frequency)
        #[arg(long)]
        entries: PathBuf,

        /// Persist the computed snapshot to the store
        #[arg(long)]
        save: bool,

        /// Print the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a report for a date range of saved snapshots
    Report {
        /// Start date, dd/mm/yyyy
        #[arg(long)]
        from: String,

        /// End date, dd/mm/yyyy
        #[arg(long)]
        to: String,

        /// Output file (defaults to the suggested report filename)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nestegg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let db = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db.get().expect("Failed to get database connection");
        migrations::run_migrations(&conn, &config.migrations_path)
            .expect("Failed to run migrations");
    }

    let result = match cli.command {
        Commands::Budget {
            entries,
            save,
            json,
        } => run_budget(&db, &entries, save, json),
        Commands::Report { from, to, out } => run_report(&db, &from, &to, out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_warning() => {
            eprintln!("{}", e.user_message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run_budget(db: &DbPool, entries: &Path, save: bool, json: bool) -> AppResult<()> {
    let content = fs::read(entries)?;
    let sheet: EntrySheet = parse_entry_file(&content)?;

    let expenses = budget::compute_total_expenses(&sheet.expenses)?;
    let snapshot = budget::build_snapshot(&sheet.income, &sheet.expenses)?;

    if json {
        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::Internal(format!("JSON encoding failed: {}", e)))?;
        println!("{}", rendered);
    } else {
        for (category, subs) in &expenses.by_category {
            for (sub_category, amount) in subs {
                if sub_category.is_empty() {
                    println!("{}: {}", category, report::format_amount(*amount));
                } else {
                    println!(
                        "{} ({}): {}",
                        category,
                        sub_category,
                        report::format_amount(*amount)
                    );
                }
            }
        }
        println!("Total Expenses: {}", report::format_amount(expenses.total));
        println!(
            "Total Savings: {}",
            report::format_amount(snapshot.total_savings)
        );
    }

    if save {
        let conn = db.get()?;
        let id = nestegg::db::queries::snapshots::insert_snapshot(&conn, &snapshot)?;
        tracing::info!(snapshot_id = id, "Data saved successfully");
        println!("Data saved successfully!");
    }

    Ok(())
}

fn run_report(db: &DbPool, from: &str, to: &str, out: Option<PathBuf>) -> AppResult<()> {
    // Date parsing happens before any store access; a format error aborts
    // with no partial output.
    let range = ReportRange::parse(from, to)?;

    let conn = db.get()?;
    let snapshots = nestegg::db::queries::snapshots::query_range(
        &conn,
        &range.start_bound(),
        &range.end_bound(),
    )?;

    let rendered = report::generate(&snapshots, &range)?;
    let mut sink = FileReportSink::new(out);
    let path = sink.deliver(&rendered)?;
    println!("Report saved successfully to: {}", path.display());

    Ok(())
}
