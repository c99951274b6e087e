//! api-qi: anonymous access-control auditor and API quality index

#![allow(clippy::too_many_lines, clippy::struct_excessive_bools)]

use anyhow::{Context, Result};
use api_qi::{
    cli,
    config::{AppConfig, ConfigOverrides},
    pipeline::exit_codes,
    reports::ReportFormat,
    scoring::{BehaviorMetrics, SecurityPosture, DEFAULT_RESPONSIBILITY, DEFAULT_SUCCESS},
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with supported inputs
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nContracts:",
        "\n  OpenAPI 3.x, Swagger 2.0 (YAML, JSON)",
        "\n\nOutput Formats:",
        "\n  table, summary, json, csv, sarif"
    )
}

#[derive(Parser)]
#[command(name = "api-qi")]
#[command(version, long_version = build_long_version())]
#[command(about = "Anonymous access-control auditor and API quality index", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Audit completed (insecure findings are reported, not fatal)
    1  API-QI below --min-score
    2  Target never became ready; nothing was probed
    3  Error occurred

EXAMPLES:
    # Audit a local service
    api-qi audit openapi.yaml --base-url http://localhost:8000

    # CI gate with SARIF output
    api-qi audit openapi.yaml -o sarif -O audit.sarif --min-score 0.7

    # Show how endpoints would be classified
    api-qi plan openapi.yaml

    # Score supplied metrics for an identity-managed service
    api-qi score --auth 0.9 --integrity 0.95 --access-control --iam")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Security posture flags shared by `audit`, `plan` and `score`
#[derive(clap::Args)]
struct PostureArgs {
    /// The service does not require authentication (maturity level 0)
    #[arg(long)]
    no_auth: bool,

    /// The service enforces per-resource access control
    #[arg(long)]
    access_control: bool,

    /// Identities are managed centrally (requires --access-control for level 3)
    #[arg(long)]
    iam: bool,
}

impl PostureArgs {
    fn apply_to(&self, overrides: &mut ConfigOverrides) {
        if self.no_auth {
            overrides.auth_required = Some(false);
        }
        if self.access_control {
            overrides.access_control = Some(true);
        }
        if self.iam {
            overrides.iam = Some(true);
        }
    }
}

/// Target connection options shared by `audit` and `plan`
#[derive(clap::Args)]
struct TargetArgs {
    /// Base URL of the service under audit
    #[arg(long, env = "API_BASE_URL")]
    base_url: Option<String>,

    /// Per-probe timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

/// Arguments for the `audit` subcommand
#[derive(Parser)]
struct AuditArgs {
    /// Path to the OpenAPI contract
    #[arg(default_value = "openapi.yaml")]
    contract: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Number of probes in flight at once (1 = sequential)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Path polled until the target answers 200
    #[arg(long)]
    readiness_path: Option<String>,

    /// Seconds to wait for the target before giving up
    #[arg(long)]
    readiness_timeout: Option<u64>,

    /// Start probing without waiting for the target
    #[arg(long)]
    skip_readiness: bool,

    #[command(flatten)]
    posture: PostureArgs,

    /// Functional success rate in [0, 1]
    #[arg(long)]
    success: Option<f64>,

    /// Responsibility score in [0, 1]
    #[arg(long)]
    responsibility: Option<f64>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if the API-QI is below this value
    #[arg(long)]
    min_score: Option<f64>,
}

/// Arguments for the `plan` subcommand
#[derive(Parser)]
struct PlanArgs {
    /// Path to the OpenAPI contract
    #[arg(default_value = "openapi.yaml")]
    contract: PathBuf,

    #[command(flatten)]
    target: TargetArgs,

    /// Output format (json, or a text table for anything else)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Authenticity in [0, 1]
    #[arg(long)]
    auth: Option<f64>,

    /// Integrity (1 - failure rate) in [0, 1]
    #[arg(long)]
    integrity: Option<f64>,

    /// Functional success rate in [0, 1]
    #[arg(long, default_value_t = DEFAULT_SUCCESS)]
    success: f64,

    /// Responsibility score in [0, 1]
    #[arg(long, default_value_t = DEFAULT_RESPONSIBILITY)]
    responsibility: f64,

    #[command(flatten)]
    posture: PostureArgs,

    /// Output format (json, or text for anything else)
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every endpoint of a contract anonymously and score the results
    Audit(AuditArgs),

    /// Classify every endpoint without sending any request
    Plan(PlanArgs),

    /// Compute the API-QI from supplied metrics
    Score(ScoreArgs),

    /// Print the normalized weight matrix
    Matrix {
        /// Output format (json, or a text table for anything else)
        #[arg(short, long, default_value = "table")]
        output: ReportFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .api-qi.yaml in the current directory
    Init,
}

/// Load the config file (if any) and layer CLI values on top.
fn load_config(path: Option<&std::path::Path>, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, overrides)?;
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(config)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries only the report
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Audit(args) => {
            let mut overrides = ConfigOverrides {
                base_url: args.target.base_url,
                timeout_secs: args.target.timeout,
                concurrency: args.concurrency,
                readiness_path: args.readiness_path,
                readiness_timeout_secs: args.readiness_timeout,
                skip_readiness: args.skip_readiness,
                success: args.success,
                responsibility: args.responsibility,
                format: args.output,
                file: args.output_file,
                no_color: cli.no_color,
                ..ConfigOverrides::default()
            };
            args.posture.apply_to(&mut overrides);

            let exit_code = cli::run_audit(cli::AuditCommand {
                contract_path: args.contract,
                config: load_config(cli.config.as_deref(), &overrides)?,
                min_score: args.min_score,
                quiet: cli.quiet,
            })?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Plan(args) => {
            let overrides = ConfigOverrides {
                base_url: args.target.base_url,
                timeout_secs: args.target.timeout,
                format: args.output,
                file: args.output_file,
                ..ConfigOverrides::default()
            };
            let config = load_config(cli.config.as_deref(), &overrides)?;
            cli::run_plan(&args.contract, &config, cli.quiet)
        }

        Commands::Score(args) => {
            let mut posture = SecurityPosture::default();
            if args.posture.no_auth {
                posture.auth_required = false;
            }
            posture.access_control = args.posture.access_control;
            posture.iam = args.posture.iam;

            cli::run_score(cli::ScoreCommand {
                posture,
                behavior: BehaviorMetrics {
                    auth: args.auth,
                    integrity: args.integrity,
                    success: Some(args.success),
                    responsibility: Some(args.responsibility),
                },
                output: args.output,
                output_file: args.output_file,
            })
        }

        Commands::Matrix {
            output,
            output_file,
        } => cli::run_matrix(output, output_file),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "api-qi", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = api_qi::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = api_qi::config::load_or_default(cli.config.as_deref())?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("api-qi").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in api_qi::config::file::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match api_qi::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".api-qi.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = api_qi::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
