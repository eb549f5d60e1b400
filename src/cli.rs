//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the persona diversity monitor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use persona_diversity::config::OutputFormat;
use persona_diversity::registry::TraitFamily;

/// Persona Diversity Monitor - statistical diversity gate for persona populations
///
/// Reads persona records (JSON), measures per-trait entropy and cross-persona
/// spread, and reports whether the population is genuinely diverse.
#[derive(Parser, Debug)]
#[command(name = "persona-diversity")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PERSONA_DIVERSITY_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute diversity metrics for one or more persona files
    Analyze {
        /// Persona JSON files ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Minimum entropy (bits) every core dimension should reach
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Also measure extended personality frameworks
        #[arg(short, long)]
        extended: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with an error when the diversity is not real
        #[arg(long)]
        fail_on_superficial: bool,
    },

    /// Print the human-readable diversity report
    Report {
        /// Persona JSON files ("-" reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Minimum entropy (bits) every core dimension should reach
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// List the trait dimensions that are measured
    Dimensions {
        /// Only show one family (core, extended, style, behavioral)
        #[arg(long)]
        family: Option<TraitFamily>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration file
    Validate,
}
