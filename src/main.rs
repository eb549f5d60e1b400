//! Persona Diversity Monitor
//!
//! Main entry point for the `persona-diversity` binary. Loads persona files,
//! runs the diversity monitor and prints the report and/or metrics.

mod cli;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info, warn};

use persona_diversity::analysis::{DiversityMonitor, DiversityOutcome};
use persona_diversity::config::{self, MonitorConfig, OutputFormat};
use persona_diversity::error::{Error, Result};
use persona_diversity::input::load_personas;
use persona_diversity::logging;
use persona_diversity::registry::{DimensionRegistry, TraitFamily};
use persona_diversity::report::render_report;
use persona_diversity::version;

use crate::cli::{Cli, Commands, ConfigSubcommand};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need the configuration
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Dimensions { family } => {
            print_dimensions(*family);
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone(), cli.config.as_deref());
        }
        _ => {}
    }

    let config = MonitorConfig::load(cli.config.as_deref())?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(version = %build.full_version(), target = %build.target, "Starting persona-diversity");

    init_thread_pool(&config);

    match cli.command {
        Commands::Analyze {
            files,
            threshold,
            extended,
            format,
            output,
            fail_on_superficial,
        } => {
            let mut options = config.monitor_options();
            if let Some(t) = threshold {
                options.entropy_threshold = t;
            }
            options.use_extended |= extended;
            validate_threshold(options.entropy_threshold)?;

            let personas = load_personas(&files)?;
            let outcome = DiversityMonitor::new(options).compute(&personas);

            let format = format.unwrap_or(config.output.format);
            let rendered = render_outcome(&outcome, format, config.output.pretty)?;
            emit(&rendered, output.as_deref())?;

            if fail_on_superficial {
                gate(&outcome)?;
            }
        }
        Commands::Report { files, threshold } => {
            let mut options = config.monitor_options();
            if let Some(t) = threshold {
                options.entropy_threshold = t;
            }
            validate_threshold(options.entropy_threshold)?;

            let personas = load_personas(&files)?;
            let report = DiversityMonitor::new(options).generate_report(&personas);
            println!("{}", report);
        }
        Commands::Version | Commands::Dimensions { .. } | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    }

    Ok(())
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(Error::config_field_invalid(
            "threshold",
            format!("entropy threshold must be a finite number >= 0, got {}", threshold),
        ))
    }
}

/// Size the global rayon pool from `[monitor] max_threads`
fn init_thread_pool(config: &MonitorConfig) {
    let threads = config.thread_count();
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("persona-diversity-{}", i))
        .build_global()
    {
        Ok(()) => debug!(threads, "Thread pool initialized"),
        Err(e) => warn!(error = %e, "Thread pool already initialized"),
    }
}

/// Serialize the outcome in the requested format
fn render_outcome(outcome: &DiversityOutcome, format: OutputFormat, pretty: bool) -> Result<String> {
    let json = || -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(outcome)?
        } else {
            serde_json::to_string(outcome)?
        })
    };
    let text = || render_report(outcome, Some(chrono::Utc::now()));

    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => json()?,
        OutputFormat::Both => format!("{}\n\n{}", text(), json()?),
    })
}

/// Write to the output file, or stdout when none is given
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
            }
            std::fs::write(path, format!("{}\n", content)).map_err(|e| Error::IoWrite {
                path: PathBuf::from(path),
                source: e,
            })?;
            info!(path = %path.display(), "Output written");
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Fail when the population is rejected or its diversity is superficial
fn gate(outcome: &DiversityOutcome) -> Result<()> {
    let metrics = outcome.clone().into_result()?;
    let health = &metrics.diversity_health;
    if health.is_real_diversity {
        return Ok(());
    }
    Err(Error::SuperficialDiversity {
        status: health.status.to_string(),
        score: health.overall_score,
    })
}

/// Print the dimension registry
fn print_dimensions(family: Option<TraitFamily>) {
    let registry = DimensionRegistry::global();
    let families: Vec<TraitFamily> = match family {
        Some(f) => vec![f],
        None => TraitFamily::all().to_vec(),
    };

    for family in families {
        println!("{} ({})", family.display_name(), registry.family_len(family));
        for dim in registry.family(family) {
            println!(
                "  {:<30} {:<36} {:<12} default={:<12} bins=[{}]",
                dim.key,
                dim.display_name,
                dim.kind.type_name(),
                dim.default.to_string(),
                dim.bin_labels().join(", ")
            );
        }
        println!();
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = MonitorConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate => {
            MonitorConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
