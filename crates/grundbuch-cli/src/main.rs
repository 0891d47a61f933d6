//! Runs one land-register extraction routine and prints its result envelope.

mod config;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use grundbuch_core::{Envelope, RoutineRegistry, invoke};

/// Grundbuch script - run an extraction routine on land-register text
#[derive(Parser, Debug)]
#[command(name = "grundbuch-script")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Routine selector, e.g. "parcels"
    #[arg(allow_hyphen_values = true)]
    selector: String,

    /// JSON argument object; everything after the selector is taken verbatim
    #[arg(allow_hyphen_values = true, trailing_var_arg = true, num_args = 0..)]
    arguments: Vec<String>,
}

impl Cli {
    fn raw_arguments(&self) -> String {
        if self.arguments.is_empty() {
            "{}".to_string()
        } else {
            self.arguments.join(" ")
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            init_logging(0);
            error!("invalid command line");
            emit(&Envelope::failure(&err.to_string()));
            return;
        }
    };

    init_logging(cli.verbose);
    install_panic_hook();
    emit(&run(&cli));
}

fn run(cli: &Cli) -> Envelope {
    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            return Envelope::failure(&format!("{:?}", err));
        }
    };

    let registry = RoutineRegistry::with_builtins(config);
    let envelope = invoke(&registry, &cli.selector, &cli.raw_arguments());
    info!(selector = %cli.selector, ok = envelope.is_ok(), "done");
    envelope
}

fn emit(envelope: &Envelope) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", envelope.to_line());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        error!(panic = %info, "routine panicked");
    }));
}
