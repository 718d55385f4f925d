//! sysbuiltins - command-line runner for the builtin tool registry

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use sysbuiltins::config::{parse_env_entry, RuntimeConfig};
use sysbuiltins::observability::init_default_logging;
use sysbuiltins::runner::{exit_code, read_input, run_tool};
use sysbuiltins::tools::{list_tools, lookup};
use sysbuiltins::{RuntimeError, RuntimeResult};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_CONFIG_PATHS: &[&str] = &["sysbuiltins.toml", "config/sysbuiltins.toml"];

/// Run native builtin tools
#[derive(Parser)]
#[command(name = "sysbuiltins")]
#[command(about = "Run native builtin tools (file, HTTP, abort)")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered builtins sorted by name
    List {
        /// Print full descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one builtin's descriptor
    Describe {
        /// Builtin name, e.g. sys.read
        name: String,
    },
    /// Invoke a builtin and print its result
    Run {
        /// Builtin name, e.g. sys.http.get
        name: String,
        /// JSON arguments; read from stdin when omitted
        #[arg(short, long, value_name = "JSON")]
        input: Option<String>,
        /// Extra environment entry passed to the builtin
        #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_entry)]
        env: Vec<String>,
        /// Validate arguments against the declared schema first
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List { json } => list_command(json),
        Commands::Describe { name } => describe_command(&name),
        Commands::Run {
            name,
            input,
            env,
            strict,
        } => run_command(&config, &name, input, &env, strict).await,
    };

    if let Err(e) = &result {
        error!("{}", e);
        process::exit(exit_code(&result));
    }
}

fn load_configuration(config_path: Option<&Path>) -> RuntimeResult<RuntimeConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(RuntimeConfig::load_from_file(path)?);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(RuntimeConfig::load_from_file(path)?);
        }
    }

    debug!("No configuration file found, using defaults");
    Ok(RuntimeConfig::default())
}

fn list_command(json: bool) -> RuntimeResult<()> {
    let tools = list_tools();

    if json {
        let rendered = serde_json::to_string_pretty(&tools)
            .map_err(|e| RuntimeError::invalid_input(e.to_string()))?;
        println!("{rendered}");
    } else {
        let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for tool in &tools {
            println!("{:<width$}  {}", tool.name, tool.description);
        }
    }

    Ok(())
}

fn describe_command(name: &str) -> RuntimeResult<()> {
    let tool = lookup(name).ok_or_else(|| RuntimeError::UnknownTool(name.to_string()))?;
    let rendered = serde_json::to_string_pretty(&tool)
        .map_err(|e| RuntimeError::invalid_input(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

async fn run_command(
    config: &RuntimeConfig,
    name: &str,
    input: Option<String>,
    extra_env: &[String],
    strict: bool,
) -> RuntimeResult<()> {
    let input = read_input(input, tokio::io::stdin()).await?;
    let ctx = CancellationToken::new();

    // Ctrl-C cancels in-flight HTTP requests
    let cancel = ctx.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received SIGINT, cancelling");
            cancel.cancel();
        }
    });

    let output = run_tool(config, name, &input, extra_env, strict, &ctx).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
