// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use oriby::cli::args::Cli;
use oriby::cli::{execute_command_with_services, exit_code};
use oriby::config::{generate_default_config, load_settings};
use oriby::exitcode;
use oriby::infrastructure::di::ServiceContainer;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        crossterm::style::force_color_output(false);
    }
    setup_logging(cli.debug, cli.no_color);

    if cli.generate_config {
        println!("{}", generate_default_config());
        return;
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {}", "Failed to load configuration".red(), e);
            std::process::exit(exitcode::USAGE);
        }
    };
    debug!("Using store at {}", settings.store_path);

    // Create service container (single composition root)
    let services = match ServiceContainer::new(&settings) {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}: {}", "Failed to open bookmark store".red(), e);
            std::process::exit(exitcode::IOERR);
        }
    };

    if let Err(e) = execute_command_with_services(cli, &services, &settings) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(exit_code(&e));
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a noisy module filter
    let noisy_modules = ["reqwest", "hyper_util", "rustls", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_cli_command_when_verify_then_debug_asserts_pass() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
