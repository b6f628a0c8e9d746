//! csvql CLI
//!
//! Command-line front end: executes one statement per invocation or imports
//! a directory of CSV files.

use std::path::PathBuf;

use clap::Parser as CliParser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use csvql::prelude::*;
use csvql::render::render_affected;
use csvql_core::{Parser, Statement};

/// LIMIT applied when a SELECT does not carry one.
const DEFAULT_LIMIT: u64 = 100;

/// Single-user relational database over CSV files.
#[derive(CliParser)]
#[command(name = "csvql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL statement to execute.
    #[arg(short, long, value_name = "SQL")]
    execute: Option<String>,

    /// Import CSV files from a directory, prompting per file and column.
    #[arg(long, value_name = "DIR")]
    import_csv: Option<PathBuf>,

    /// Data directory holding the catalog and table files.
    #[arg(short, long, env = "CSVQL_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = StoreConfig::new(&cli.data_dir);

    if let Some(csv_dir) = cli.import_csv {
        import_csv(&csv_dir, &config)?;
    } else if let Some(sql) = cli.execute {
        run_statement(&sql, &config)?;
    } else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
    }

    Ok(())
}

/// Parses, validates, and executes one statement, printing its outcome.
fn run_statement(sql: &str, config: &StoreConfig) -> csvql::error::Result<()> {
    let mut meta = Metadata::load(config)?;

    let mut statement = Parser::new(sql)
        .parse_statement()
        .map_err(EngineError::from)?;
    if let Statement::Select(select) = &mut statement {
        select.default_limit(DEFAULT_LIMIT);
    }

    validate(&statement, &meta.database)?;

    let outcome = Executor::new(&mut meta, config).execute(&statement)?;
    match outcome {
        Outcome::Rows(rs) => print!("{rs}"),
        Outcome::Affected(ids) => {
            if matches!(statement, Statement::Insert(_)) {
                println!("Inserted row");
            } else {
                println!("{}", render_affected(&ids));
            }
        }
    }

    Ok(())
}
