use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wellness_journal::args::{Args, Command};
use wellness_journal::{commands, menu, App, Config, Result};

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    // Failures are reported but never change the exit code.
    if let Err(e) = main_inner(args) {
        error!("{e}");
    }
    ExitCode::SUCCESS
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let command = args.command();

    let mut app = match command {
        Command::Init => {
            commands::init(home)?.print();
            return Ok(());
        }
        _ => {
            let config = Config::load(home, args.common().data_file())?;
            debug!("Using journal file {}", config.data_path().display());
            App::open(config)
        }
    };

    // Route to appropriate command handler
    let _: () = match command.clone() {
        // Handled above.
        Command::Init => (),
        Command::Menu => menu::run(&mut app, io::stdin().lock(), io::stdout().lock())?,
        Command::Add(activity_args) => commands::add(&mut app, activity_args)?.print(),
        Command::List => commands::list(&app)?.print(),
        Command::Update(update_args) => commands::update(&mut app, update_args)?.print(),
        Command::Delete(delete_args) => commands::delete(&mut app, delete_args)?.print(),
        Command::Summary => commands::summary(&app)?.print(),
    };

    if command.mutates() {
        app.save_or_report();
    }
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
