use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use bills::config::{config_dir, load_config, CONFIG_TEMPLATE, LEDGER_TEMPLATE};
use bills::error::{BillError, Result};
use bills::ledger::{load_ledger, BillStatus, LEDGER_FILE};
use bills::recurrence::{RecurrenceEngine, RunReport};
use bills::store::FileStore;

#[derive(Parser)]
#[command(name = "bills")]
#[command(version, about = "Recurring bill generation for accounts payable", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.bills or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Generate the occurrences recurring bills owe as of today
    Run {
        /// Show what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// List bills
    List {
        /// Number of bills to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only show recurring templates
        #[arg(short, long)]
        recurring: bool,

        /// Reference date for overdue status (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Show ledger status and templates due for generation
    Status {
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays a clean record of the run.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bills=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Run { dry_run, today } => cmd_run(&cfg_dir, dry_run, resolve_today(today)?),
        Commands::List {
            limit,
            recurring,
            today,
        } => cmd_list(&cfg_dir, limit, recurring, resolve_today(today)?),
        Commands::Status { today } => cmd_status(&cfg_dir, resolve_today(today)?),
    }
}

fn resolve_today(input: Option<String>) -> Result<NaiveDate> {
    match input {
        Some(s) => {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| BillError::InvalidDate(s))
        }
        None => Ok(Local::now().date_naive()),
    }
}

fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(BillError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(BillError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join(LEDGER_FILE), LEDGER_TEMPLATE)?;

    println!("Initialized bills config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Review engine settings:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Add your bills:          $EDITOR {}/{}",
        cfg_dir.display(),
        LEDGER_FILE
    );
    println!();
    println!("Then schedule the generator, e.g. daily from cron:");
    println!("  bills run");

    Ok(())
}

/// Run the recurrence engine
fn cmd_run(cfg_dir: &Path, dry_run: bool, today: NaiveDate) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let engine = RecurrenceEngine::new(config.engine.options(dry_run));

    let report = if dry_run {
        engine.run(&mut FileStore::read_only(cfg_dir), today)?
    } else {
        engine.run(&mut FileStore::locked(cfg_dir)?, today)?
    };

    print_report(&report, &config.display.currency_symbol);

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(BillError::RunIncomplete(report.failures.len()))
    }
}

fn print_report(report: &RunReport, currency_symbol: &str) {
    let verb = if report.dry_run { "Would generate" } else { "Generated" };
    for occ in &report.generated {
        println!(
            "{verb}: {} - {} ({}{:.2})",
            occ.description, occ.due_date, currency_symbol, occ.amount
        );
    }

    for issue in &report.skipped {
        println!(
            "Skipped #{} '{}': {}",
            issue.template_id, issue.description, issue.error
        );
    }
    for issue in &report.failures {
        println!(
            "Failed #{} '{}': {}",
            issue.template_id, issue.description, issue.error
        );
    }

    println!("{}", report.summary());
}

// Table row structs for tabled
#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "DAYS")]
    days: String,
    #[tabled(rename = "RECURRENCE")]
    recurrence: String,
    #[tabled(rename = "NEXT")]
    next: String,
}

/// List bills ordered by due date
fn cmd_list(cfg_dir: &Path, limit: Option<usize>, recurring: bool, today: NaiveDate) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let ledger = load_ledger(cfg_dir)?;

    let mut bills: Vec<_> = ledger
        .bills
        .iter()
        .filter(|b| !recurring || b.recurring)
        .collect();

    if bills.is_empty() {
        println!("No bills found.");
        println!("Add bills to: {}/{}", cfg_dir.display(), LEDGER_FILE);
        return Ok(());
    }

    bills.sort_by_key(|b| (b.due_date, b.id));
    let shown = match limit {
        Some(n) => &bills[..n.min(bills.len())],
        None => &bills[..],
    };

    let rows: Vec<BillRow> = shown
        .iter()
        .map(|b| BillRow {
            id: b.id,
            due: b.due_date.to_string(),
            description: b.description.clone(),
            amount: format!("{}{:.2}", config.display.currency_symbol, b.amount),
            status: b.display_status(today).to_string(),
            days: match b.display_status(today) {
                BillStatus::Pending | BillStatus::Overdue => b.days_until_due(today).to_string(),
                _ => "-".to_string(),
            },
            recurrence: match (&b.recurrence_type, b.recurring) {
                (Some(r), true) => r.to_string(),
                (None, true) => "missing".to_string(),
                _ => "-".to_string(),
            },
            next: if b.recurring {
                b.generation_cursor().to_string()
            } else {
                "-".to_string()
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} bills", bills.len());

    Ok(())
}

/// Show ledger status
fn cmd_status(cfg_dir: &Path, today: NaiveDate) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let ledger = load_ledger(cfg_dir)?;

    let templates = ledger.templates().count();
    let active = ledger.templates().filter(|b| b.is_eligible(today)).count();
    let overdue = ledger.bills.iter().filter(|b| b.is_overdue(today)).count();
    let due: Vec<_> = ledger
        .due_templates(today)
        .into_iter()
        .filter(|b| b.recurrence_active(today))
        .collect();

    println!("Bills Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Today:            {}", today);
    println!("Catch-up policy:  {:?}", config.engine.catch_up);
    println!("Bills:            {}", ledger.bills.len());
    println!("Templates:        {} ({} active)", templates, active);
    println!("Overdue:          {}", overdue);
    println!("Due for run:      {}", due.len());

    if !due.is_empty() {
        println!();
        println!("Templates due:");
        for bill in due.iter().take(10) {
            println!(
                "  #{} {} - since {}",
                bill.id,
                bill.description,
                bill.generation_cursor()
            );
        }
    }

    Ok(())
}
