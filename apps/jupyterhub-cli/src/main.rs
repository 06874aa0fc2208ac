#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `jupyterhub` - drive the JupyterHub provider from a terminal.
//!
//! Configuration is read from an optional YAML file, then overridden by
//! command-line flags. Anything still unset falls back to the
//! `JUPYTERHUB_*` environment variables and provider defaults.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use figment::Figment;
use figment::providers::{Format, Yaml};
use jupyterhub_provider::JupyterHubProvider;
use jupyterhub_provider::config::{ConfigAttribute, ProviderConfig};
use jupyterhub_sdk::{ConfigValue, Diagnostics, Provider, RawConfig, ReadRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jupyterhub", version, about = "Query JupyterHub through the provider")]
struct Cli {
    /// YAML file with provider configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API host, e.g. `hub.example.com:8000`
    #[arg(long)]
    host: Option<String>,

    /// `http` or `https`
    #[arg(long)]
    protocol: Option<String>,

    /// URL prefix JupyterHub is served under
    #[arg(long)]
    prefix: Option<String>,

    /// API token
    #[arg(long)]
    token: Option<String>,

    /// Username for basic auth, used when no token is set
    #[arg(long)]
    username: Option<String>,

    /// Password for basic auth
    #[arg(long)]
    password: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the provider and data source schemas as JSON
    Schema,
    /// Read a user and print its state as JSON
    User {
        /// JupyterHub username
        name: String,
    },
}

impl Cli {
    fn overrides(&self) -> [(ConfigAttribute, Option<&str>); 6] {
        [
            (ConfigAttribute::Protocol, self.protocol.as_deref()),
            (ConfigAttribute::Host, self.host.as_deref()),
            (ConfigAttribute::Prefix, self.prefix.as_deref()),
            (ConfigAttribute::Token, self.token.as_deref()),
            (ConfigAttribute::Username, self.username.as_deref()),
            (ConfigAttribute::Password, self.password.as_deref()),
        ]
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load explicit configuration from a YAML file.
fn load_file(path: &Path) -> Result<ProviderConfig> {
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Figment::new()
        .merge(Yaml::file(path))
        .extract()
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// File contents with command-line overrides applied, as the host's raw map.
fn build_raw_config(cli: &Cli) -> Result<RawConfig> {
    let mut config = match &cli.config {
        Some(path) => load_file(path)?,
        None => ProviderConfig::default(),
    };
    for (attr, value) in cli.overrides() {
        if let Some(value) = value {
            config.set(attr, ConfigValue::known(value));
        }
    }

    Ok(ConfigAttribute::ALL
        .into_iter()
        .map(|attr| (attr.name().to_owned(), config.get(attr).clone()))
        .collect())
}

fn report(diags: &Diagnostics) -> ExitCode {
    for diag in diags {
        eprintln!("{diag}");
    }
    ExitCode::FAILURE
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let provider = JupyterHubProvider::new(env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Schema => {
            let data_sources: serde_json::Map<String, serde_json::Value> = provider
                .data_sources()
                .iter()
                .map(|ds| -> Result<(String, serde_json::Value)> {
                    Ok((ds.type_name(), serde_json::to_value(ds.schema())?))
                })
                .collect::<Result<_>>()?;
            let out = serde_json::json!({
                "provider": provider.schema(),
                "data_sources": data_sources,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::User { name } => {
            let raw = build_raw_config(cli)?;
            let client = match provider.configure(&raw).await {
                Ok(client) => client,
                Err(diags) => return Ok(report(&diags)),
            };

            let mut sources = provider.data_sources();
            let Some(source) = sources.first_mut() else {
                bail!("provider offers no data sources");
            };
            source.configure(client);

            let request = ReadRequest::new().with_attribute("name", ConfigValue::known(name.as_str()));
            match source.read(&request).await {
                Ok(state) => {
                    println!("{}", serde_json::to_string_pretty(&state)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(diags) => Ok(report(&diags)),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli).await
}
