use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bmc_cert_metrics::cli::{CliArgs, VERSION};
use bmc_cert_metrics::config::Config;
use bmc_cert_metrics::ingest::{DocumentOutcome, Ingestor};
use bmc_cert_metrics::models::CanonicalCertMetrics;
use bmc_cert_metrics::normalize::SystemClock;
use bmc_cert_metrics::output::write_record;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli_args = match CliArgs::parse() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if cli_args.show_help {
        CliArgs::print_help();
        return ExitCode::SUCCESS;
    }

    if cli_args.show_version {
        CliArgs::print_version();
        return ExitCode::SUCCESS;
    }

    let mut config = Config::load();
    if let Some(vendor) = cli_args.vendor {
        config.vendor = vendor;
    }
    if cli_args.pretty {
        config.pretty = true;
    }

    if cli_args.validate_config {
        return ExitCode::from(print_config_validation(&config));
    }

    if let Err(errors) = config.validate() {
        eprintln!("Configuration validation failed:");
        for err in errors {
            eprintln!("  - {}: {}", err.field, err.message);
        }
        return ExitCode::from(EXIT_USAGE);
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(version = VERSION, vendor = %config.vendor, "starting bmc-cert-metrics");

    let ingestor = Ingestor::new(SystemClock, config.vendor_override());
    let inputs = if cli_args.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli_args.files
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for input in &inputs {
        let result = if input == "-" {
            ingestor.ingest_reader("<stdin>", io::stdin().lock())
        } else {
            ingestor.ingest_path(Path::new(input))
        };

        match result {
            Ok(DocumentOutcome::Certificate { vendor, normalized }) => {
                report_expiry(input, &normalized.metrics, config.warn_days);
                if let Err(e) = write_record(&mut out, &normalized.metrics, config.pretty) {
                    error!(error = %e, "failed to write record");
                    return ExitCode::from(EXIT_FAILURE);
                }
                info!(origin = %input, vendor = %vendor, "certificate normalized");
            }
            Ok(DocumentOutcome::Collection { members }) => {
                info!(origin = %input, count = members.len(), "certificate collection, fetch members individually");
                for member in members {
                    info!(origin = %input, member = %member, "collection member");
                }
            }
            Err(e) => {
                error!(error = %e, "failed to ingest document");
                failures += 1;
            }
        }
    }

    if let Err(e) = out.flush() {
        error!(error = %e, "failed to flush output");
        return ExitCode::from(EXIT_FAILURE);
    }

    if failures > 0 {
        warn!(failures, total = inputs.len(), "some documents were rejected");
        ExitCode::from(EXIT_FAILURE)
    } else {
        ExitCode::SUCCESS
    }
}

fn report_expiry(origin: &str, metrics: &CanonicalCertMetrics, warn_days: i64) {
    let Some(days) = metrics.days_to_expiry else {
        return;
    };
    let id = metrics.id.as_deref().unwrap_or("-");

    if metrics.is_expired() {
        warn!(origin = %origin, id = %id, days, "certificate has expired");
    } else if metrics.expires_within(warn_days) {
        warn!(origin = %origin, id = %id, days, "certificate expires soon");
    }
}

/// Returns the process exit status.
fn print_config_validation(config: &Config) -> u8 {
    println!("Validating configuration...");
    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid.");
            if let Some(ref path) = config.config_path {
                println!("Config file: {}", path);
            }
            println!("Log level: {}", config.log_level);
            println!("Vendor: {}", config.vendor);
            println!("Warn days: {}", config.warn_days);
            println!("Pretty output: {}", config.pretty);
            0
        }
        Err(errors) => {
            eprintln!("Configuration validation failed:");
            for err in errors {
                eprintln!("  - {}: {}", err.field, err.message);
            }
            EXIT_USAGE
        }
    }
}
