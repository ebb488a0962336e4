mod commands;
mod paths;
mod render;
mod settings;

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use log::info;
use peoplegrid_lib::Table;
use peoplegrid_lib::generate::parse_lengths;
use peoplegrid_lib::make_data;
use peoplegrid_lib::table::demo_columns;
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

use commands::Outcome;
use commands::Session;
use settings::Settings;
use settings::SettingsError;

/// Browse a generated table of people from the terminal.
#[derive(Parser, Debug)]
#[command(name = "peoplegrid", version)]
struct Args {
    /// Records per level, comma separated (e.g. "20,3")
    #[arg(long)]
    lengths: Option<String>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Page shown at start (0-based)
    #[arg(long)]
    page_index: Option<usize>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Settings file (defaults to config.json in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level written to the log file
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Table(#[from] peoplegrid_lib::Error),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Warning: cannot write log to {}: {}", path.display(), e),
    }
}

fn load_settings(args: &Args) -> Result<Settings, StartupError> {
    let mut settings = match args.config.clone().or_else(paths::config_file) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    if let Some(lengths) = &args.lengths {
        settings.lengths = parse_lengths(lengths)?;
    }
    if let Some(page_size) = args.page_size {
        settings.table.page_size = page_size;
    }
    if let Some(page_index) = args.page_index {
        settings.table.initial_page_index = page_index;
    }
    Ok(settings)
}

fn run(args: &Args) -> Result<(), StartupError> {
    let settings = load_settings(args)?;
    info!("Starting with lengths {:?}", settings.lengths);
    let table = Table::new(demo_columns(), make_data(&settings.lengths), settings.table)?;
    let mut session = Session::new(table);

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    println!("{}", render::render_table(session.table()));
    for line in input.lines() {
        let line = line?;
        match session.execute(&line) {
            Ok(Some(Outcome::Render)) => println!("{}", render::render_table(session.table())),
            Ok(Some(Outcome::Print(text))) => println!("{}", text),
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
    info!("Exiting");
    Ok(())
}
