//! jpgscale CLI - shrink a JPEG by a percentage
//!
//! Any of input, output or percentage missing from the command line is asked
//! for interactively.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing::{debug, info};

use jpgscale::processing::{JPEG_EXTENSIONS, JPEG_QUALITY};
use jpgscale::prompt::Prompter;
use jpgscale::{
    init, init_with_settings, JpgScaleError, ProcessingEngine, ProcessingOutcome, ResizeJob,
    Settings,
};

/// jpgscale - shrink a JPEG by a percentage
#[derive(Parser)]
#[command(
    name = "jpgscale",
    version,
    about = "Resize a JPEG image by a percentage",
    long_about = "Resize a JPEG image by a percentage and save it as a new JPEG. \
                  Percentages of 100 or more leave the image at its original size. \
                  Options left out are asked for interactively. \
                  Prompts and confirmations go to stdout; errors and logs go to stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input JPEG
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output JPEG (must end in .jpg or .jpeg)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Target size as a percentage of the original (e.g. 50 for half size)
    #[arg(short, long, value_name = "PERCENT", allow_negative_numbers = true)]
    percentage: Option<f64>,

    /// Settings file path (.toml or .yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'Q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Validate a settings file
    Config {
        /// Settings file to validate
        file: PathBuf,
    },
    /// Write a settings file with default values
    ExampleConfig {
        /// Output file path; the extension picks TOML or YAML
        #[arg(short, long, default_value = "jpgscale.toml")]
        output: PathBuf,
    },
    /// Show version and format support
    Info,
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        if let Err(e) = handle_subcommand(command) {
            eprintln!("{}: {:#}", style("Error").red().bold(), e);
            process::exit(1);
        }
        return;
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", style(e.user_message()).red());
            process::exit(1);
        }
    };

    let job = match collect_job(&cli) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("{}", style(e.user_message()).red());
            process::exit(1);
        }
    };

    let engine = ProcessingEngine::with_settings(&settings);
    match engine.process(&job) {
        Ok(outcome) => report(&outcome, cli.json),
        Err(e) => {
            debug!("Processing failed: {:?}", e);
            eprintln!("{}", style(e.user_message()).red());
            process::exit(1);
        }
    }
}

/// Load settings and install logging; flags override the file's level
fn load_settings(cli: &Cli) -> Result<Settings, JpgScaleError> {
    let mut settings = match &cli.config {
        Some(path) => {
            let settings = Settings::from_file(path)?;
            settings.validate()?;
            settings
        }
        None => Settings::default(),
    };

    if cli.quiet {
        settings.logging.level = "error".to_string();
    } else if cli.verbose {
        settings.logging.level = "debug".to_string();
    }

    if cli.config.is_some() || cli.quiet || cli.verbose {
        init_with_settings(&settings)?;
    } else {
        init()?;
    }

    if let Some(path) = &cli.config {
        info!("Loaded settings from: {:?}", path);
    }
    Ok(settings)
}

/// Build the job from flags, prompting for whatever is missing
fn collect_job(cli: &Cli) -> Result<ResizeJob, JpgScaleError> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let source = match &cli.input {
        Some(path) => path.clone(),
        None => prompter.source_path()?,
    };
    let destination = match &cli.output {
        Some(path) => path.clone(),
        None => prompter.destination_path()?,
    };
    let percentage = match cli.percentage {
        Some(percentage) => percentage,
        None => prompter.percentage()?,
    };

    let job = ResizeJob::new(source, destination, percentage);
    debug!("Job: {:?}", job);
    Ok(job)
}

/// Print the confirmation for a finished job
fn report(outcome: &ProcessingOutcome, json_output: bool) {
    info!("On-disk size change: {:.1}% smaller", outcome.size_reduction());

    if json_output {
        let json = serde_json::to_value(outcome).and_then(|mut value| {
            value["size_reduction"] = serde_json::json!(outcome.size_reduction());
            serde_json::to_string_pretty(&value)
        });
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: {}", style("Error").red().bold(), e),
        }
        return;
    }

    // Debug formatting keeps the decimal point: 50 prints as 50.0
    if outcome.applied() {
        println!(
            "The image was resized by {:?}% and saved to: {}",
            outcome.percentage,
            outcome.output.path.display()
        );
    } else {
        println!("The entered percentage is greater than or equal to 100%. No resizing will be performed.");
    }
}

/// Handle subcommands
fn handle_subcommand(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config { file } => validate_config_file(&file),
        Commands::ExampleConfig { output } => generate_example_config(&output),
        Commands::Info => {
            show_info();
            Ok(())
        }
    }
}

/// Validate a settings file
fn validate_config_file(file_path: &Path) -> anyhow::Result<()> {
    let settings = Settings::from_file(file_path)
        .with_context(|| format!("cannot load {}", file_path.display()))?;
    settings.validate()?;

    println!("{}: Configuration file is valid", style("Success").green().bold());
    println!("Filter: {:?}", settings.resize.filter);
    println!("Log level: {}", settings.logging.level);

    Ok(())
}

/// Write the default settings
fn generate_example_config(output_path: &Path) -> anyhow::Result<()> {
    Settings::default()
        .to_file(output_path)
        .with_context(|| format!("cannot write {}", output_path.display()))?;

    println!(
        "{}: Generated example configuration: {}",
        style("Success").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Show version and format support
fn show_info() {
    println!("{}", style("jpgscale").bold());
    println!();
    println!("{}: {}", style("Version").bold(), jpgscale::VERSION);
    println!();
    println!("{}", style("Formats:").bold());
    println!("  Input: JPEG ({})", JPEG_EXTENSIONS.join(", "));
    println!("  Output: JPEG, quality {}", JPEG_QUALITY);
    println!();
    println!("{}", style("Defaults:").bold());
    println!("  Filter: {:?}", Settings::default().resize.filter);
    println!("  Rounding: nearest pixel, halves up");
}
