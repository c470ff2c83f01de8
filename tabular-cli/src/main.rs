//! Terminal demo: renders a table of people and replays header clicks.

mod demo;
mod error;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tabular_lib::TableOptions;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tabular")]
#[command(about = "Render a sortable table of records")]
struct Args {
    /// Click a column header; repeat to replay several clicks in order
    #[arg(long = "toggle", value_name = "COLUMN")]
    toggles: Vec<String>,

    /// Treat clicks as shift-clicks that add columns to the sort
    #[arg(long)]
    multi: bool,

    /// Start newly sorted columns descending
    #[arg(long)]
    desc_first: bool,

    /// JSON file holding an array of records (defaults to the built-in people)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Print the row model as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let logger = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    if let Err(e) = logger {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let records = demo::load(args.data.as_deref())?;
    let options = TableOptions::default()
        .with_multi_sort(args.multi)
        .with_sort_desc_first(args.desc_first);
    let table = demo::table(options)?;

    let sorting = table.sort_controller();
    for column in &args.toggles {
        if args.multi {
            sorting.toggle_multi(column)?;
        } else {
            sorting.toggle(column)?;
        }
    }
    let sort = sorting.current();
    log::debug!("Final sort: {:?}", sort.entries());

    let model = table.row_model(&records, &sort)?;
    if !model.faults().is_empty() {
        log::info!("{} cells could not be resolved", model.faults().len());
    }

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &model)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render::render(&table, &model, &sort))?;
    }
    Ok(())
}
