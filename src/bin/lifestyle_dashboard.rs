// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Lifestyle Dashboard
//!
//! Command-line front end: `analyze` runs one analysis and prints the report,
//! `status` shows which optional capabilities are available.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lifestyle_advisor::{
    capabilities::Capabilities,
    config::{AppConfig, LifestyleConfig},
    constants::{defaults, env_vars},
    intelligence::{LifestyleAnalyzer, RecommendationEngine},
    logging::LoggingConfig,
    models::{BodyInput, ExerciseType, MetricsInput},
    render,
    suggestions::SuggestionMode,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "lifestyle-dashboard")]
#[command(version, about = "Personal lifestyle analysis with optional score prediction and AI tips")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze lifestyle metrics
    Analyze(AnalyzeArgs),
    /// Show configuration and capability status
    Status {
        #[command(flatten)]
        session: SessionArgs,

        /// Print the capability report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Weight in kilograms (30-200)
    #[arg(long, default_value_t = defaults::WEIGHT_KG)]
    weight: f64,

    /// Height in centimeters (100-250)
    #[arg(long, default_value_t = defaults::HEIGHT_CM)]
    height: f64,

    /// BMI entered directly (10-40), instead of weight and height
    #[arg(long, conflicts_with_all = ["weight", "height"])]
    bmi: Option<f64>,

    /// Daily water intake in liters (0-5)
    #[arg(long, default_value_t = defaults::WATER_LITERS)]
    water: f64,

    /// Workout days per week (0-7)
    #[arg(long, default_value_t = defaults::WORKOUT_DAYS)]
    workout: u8,

    /// Primary exercise type: cardio, yoga, strength or balanced
    #[arg(long, default_value = "cardio")]
    exercise: ExerciseType,

    /// Meals per day (1-6)
    #[arg(long, default_value_t = defaults::MEALS_PER_DAY)]
    meals: u8,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    session: SessionArgs,
}

/// Overrides for the environment configuration
#[derive(Args)]
struct SessionArgs {
    /// Path of the JSON model artifact
    #[arg(long)]
    model: Option<PathBuf>,

    /// Fail instead of disabling prediction when the model cannot be loaded
    #[arg(long)]
    require_model: bool,

    /// Path of the TOML threshold configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// AI suggestion mode: search or advice
    #[arg(long)]
    mode: Option<SuggestionMode>,

    /// Skip AI suggestions for this run
    #[arg(long)]
    no_ai: bool,
}

impl SessionArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.model {
            config.model.path = path.clone();
        }
        config.model.required |= self.require_model;
        if let Some(path) = &self.config {
            config.lifestyle_config_path = Some(path.clone());
        }
        if let Some(mode) = self.mode {
            config.ai.mode = mode;
        }
        if self.no_ai {
            config.ai.enabled = false;
        }
    }
}

impl AnalyzeArgs {
    fn to_input(&self) -> MetricsInput {
        let body = match self.bmi {
            Some(bmi) => BodyInput::DirectBmi(bmi),
            None => BodyInput::Measurements {
                weight_kg: self.weight,
                height_cm: self.height,
            },
        };

        MetricsInput {
            body,
            water_liters: self.water,
            workout_days_per_week: self.workout,
            exercise_type: self.exercise,
            meals_per_day: self.meals,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = bootstrap(cli.verbose, AppConfig::from_env)?;

    match cli.command {
        Commands::Analyze(args) => {
            args.session.apply(&mut config);
            run_analyze(&config, &args).await
        }
        Commands::Status { session, json } => {
            session.apply(&mut config);
            run_status(&config, json)
        }
    }
}

/// Set up logging, then load configuration so its events are recorded
fn bootstrap<F>(verbose: bool, load_config: F) -> Result<AppConfig>
where
    F: FnOnce() -> Result<AppConfig>,
{
    // .env may carry RUST_LOG; a missing file is reported by AppConfig::from_env
    dotenv::dotenv().ok();
    init_logging(verbose)?;
    load_config()
}

fn init_logging(verbose: bool) -> Result<()> {
    let logging = LoggingConfig::from_env();
    // Keep the terminal quiet unless asked otherwise
    let logging = if verbose {
        logging.with_level("debug")
    } else if std::env::var(env_vars::LOG_LEVEL).is_err() {
        logging.with_level("warn")
    } else {
        logging
    };
    logging.init().context("Failed to initialize logging")
}

async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> Result<()> {
    let lifestyle = LifestyleConfig::load(config.lifestyle_config_path.as_deref())?;
    let capabilities = Capabilities::resolve(config)?;
    debug!("{}", config.summary());

    let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::with_config(lifestyle));
    let report = analyzer.analyze(&args.to_input()).await?;
    info!(analysis.id = %report.id, "Rendering report");

    if args.json {
        eprint!("{}", render::render_warnings(&capabilities));
        println!("{}", render::render_json(&report)?);
    } else {
        let warnings = render::render_warnings(&capabilities);
        if !warnings.is_empty() {
            println!("{warnings}");
        }
        print!("{}", render::render_report(&report));
    }

    Ok(())
}

fn run_status(config: &AppConfig, json: bool) -> Result<()> {
    let capabilities = Capabilities::resolve(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&capabilities.report())?);
    } else {
        println!("{}\n", config.summary());
        print!("{}", render::render_status(&capabilities));
    }

    Ok(())
}
