pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use advisor_core::config::{AppConfig, LogFormat};
use clap::{Parser, Subcommand};
use tracing::Level;

use commands::{Invocation, RecommendArgs, ShowArgs};

#[derive(Debug, Parser)]
#[command(
    name = "advisor",
    about = "Smart-home product advisor CLI",
    long_about = "Score the product catalog against questionnaire answers, persist the result, and browse it through filters.",
    after_help = "Examples:\n  advisor recommend --answers '{\"budget\":200,\"goals\":[\"security\"]}'\n  advisor show --tab security --max-price 150\n  advisor config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an advisor.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Path to a JSON catalog replacing the built-in one")]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, help = "Session id whose persisted state is read and written")]
    session: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate recommendations from questionnaire answers and save them")]
    Recommend {
        #[arg(long, help = "Answers as a JSON object, or @path to read them from a file")]
        answers: String,
        #[arg(long, help = "Skip persisting the generated result")]
        no_save: bool,
    },
    #[command(about = "Show the persisted recommendations through the filter engine")]
    Show {
        #[arg(long, help = "all, providers, or a category name")]
        tab: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long = "brand", help = "Keep only this brand (repeatable)")]
        brands: Vec<String>,
        #[arg(long = "compat", help = "Require this compatibility standard (repeatable)")]
        compatibility: Vec<String>,
        #[arg(long)]
        hide_contract: bool,
        #[arg(long)]
        hide_no_contract: bool,
        #[arg(long, help = "Regenerate from saved answers when the saved result is unusable")]
        recover: bool,
    },
    #[command(about = "List catalog products, providers, goals and ecosystems")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let invocation =
        Invocation { config_path: cli.config, catalog_path: cli.catalog, session_id: cli.session };

    if let Ok(config) = AppConfig::load(invocation.load_options()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend { answers, no_save } => {
            commands::recommend::run(&invocation, &RecommendArgs { answers, no_save })
        }
        Command::Show {
            tab,
            min_price,
            max_price,
            brands,
            compatibility,
            hide_contract,
            hide_no_contract,
            recover,
        } => commands::show::run(
            &invocation,
            &ShowArgs {
                tab,
                min_price,
                max_price,
                brands,
                compatibility,
                hide_contract,
                hide_no_contract,
                recover,
            },
        ),
        Command::Catalog => commands::catalog::run(&invocation),
        Command::Config => commands::config::run(&invocation),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON payload.
fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
