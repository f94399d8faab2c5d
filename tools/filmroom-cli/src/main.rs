//! Filmroom CLI: plan and inspect clip compositions.
//!
//! Usage:
//!   filmroom plan <PROPS>            Write the composition plan as JSON
//!   filmroom frame <PROPS> <FRAME>   Show the resolved state of one frame
//!   filmroom info <PROPS>            List the composed clips
//!   filmroom validate <PROPS>        Report invalid clips and missing videos
//!   filmroom sheet <PROPS> -o <OUT>  Write every frame's state as JSON lines

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use filmroom_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "filmroom",
    about = "Sequence tagged clips into a single composed film",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the composition plan for a props file
    Plan {
        /// Path to the render props JSON
        props: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template: back-to-back, first-seconds or preview
        #[arg(long)]
        template: Option<String>,

        /// Reference bundled media files instead of backend URLs
        #[arg(long, conflicts_with = "remote")]
        static_file: bool,

        /// Reference backend URLs even if the props ask for bundled files
        #[arg(long)]
        remote: bool,
    },

    /// Show the resolved state of one output frame
    Frame {
        /// Path to the render props JSON
        props: PathBuf,

        /// Global output frame
        frame: u64,

        /// Template: back-to-back, first-seconds or preview
        #[arg(long)]
        template: Option<String>,
    },

    /// List the clips of the composed timeline
    Info {
        /// Path to the render props JSON
        props: PathBuf,

        /// Template: back-to-back, first-seconds or preview
        #[arg(long)]
        template: Option<String>,
    },

    /// Validate a props file
    Validate {
        /// Path to the render props JSON
        props: PathBuf,
    },

    /// Resolve every output frame and write them as JSON lines
    Sheet {
        /// Path to the render props JSON
        props: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of resolution workers
        #[arg(long, default_value = "4")]
        workers: usize,

        /// Template: back-to-back, first-seconds or preview
        #[arg(long)]
        template: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    filmroom_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Plan {
            props,
            output,
            template,
            static_file,
            remote,
        } => commands::plan::run(&config, props, output, template, static_file, remote),
        Commands::Frame {
            props,
            frame,
            template,
        } => commands::frame::run(&config, props, frame, template),
        Commands::Info { props, template } => commands::info::run(&config, props, template),
        Commands::Validate { props } => commands::validate::run(&config, props),
        Commands::Sheet {
            props,
            output,
            workers,
            template,
        } => commands::sheet::run(&config, props, output, workers, template).await,
    }
}
