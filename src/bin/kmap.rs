//! kmap - flatten and expand Kubernetes workload objects from the command line.
//!
//! `kmap flatten` reads a typed object (Kubernetes JSON/YAML shape) and prints
//! its attribute tree. `kmap expand` reads an attribute tree and prints the
//! typed object.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use k8s_openapi::api::core::v1::{
    CSIVolumeSource, ConfigMapVolumeSource, EmptyDirVolumeSource, ProjectedVolumeSource,
    SecretVolumeSource, Toleration, WindowsSecurityContextOptions,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use kube_structures::{value, DecodeError, Structure, Value};

#[derive(Debug, Parser)]
#[command(name = "kmap", version, about = "Map Kubernetes workload objects to attribute trees and back")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "KMAP_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Turn a typed object into an attribute tree
    Flatten(Args),
    /// Turn an attribute tree into a typed object
    Expand(Args),
}

#[derive(Debug, clap::Args)]
struct Args {
    /// Entity the document describes
    #[arg(short, long, value_enum)]
    kind: Kind,

    /// Input file, `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Tolerations,
    Secret,
    ConfigMap,
    EmptyDir,
    Csi,
    Projected,
    WindowsOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Flatten,
    Expand,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path:?}: {source}")]
    Write { path: String, source: io::Error },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("attribute tree must be a list, got {actual}")]
    NotAList { actual: &'static str },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn setup_logging(level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    let (direction, args) = match command {
        Command::Flatten(args) => (Direction::Flatten, args),
        Command::Expand(args) => (Direction::Expand, args),
    };

    let content = read_input(&args.input)?;
    let rendered = match args.kind {
        Kind::Tolerations => process::<Vec<Toleration>>(direction, &content, args.format),
        Kind::Secret => process::<SecretVolumeSource>(direction, &content, args.format),
        Kind::ConfigMap => process::<ConfigMapVolumeSource>(direction, &content, args.format),
        Kind::EmptyDir => process::<EmptyDirVolumeSource>(direction, &content, args.format),
        Kind::Csi => process::<CSIVolumeSource>(direction, &content, args.format),
        Kind::Projected => process::<ProjectedVolumeSource>(direction, &content, args.format),
        Kind::WindowsOptions => {
            process::<WindowsSecurityContextOptions>(direction, &content, args.format)
        }
    }?;
    write_output(&args.output, &rendered)
}

fn process<T>(direction: Direction, content: &str, format: Format) -> Result<String, CliError>
where
    T: Structure + Serialize + DeserializeOwned,
{
    tracing::debug!(kind = T::KIND, ?direction, "processing document");
    match direction {
        Direction::Flatten => {
            let typed: T = serde_yaml::from_str(content)?;
            render(&Value::List(typed.flatten()), format)
        }
        Direction::Expand => {
            let tree = value::from_yaml(content)?;
            let list = tree.as_list().ok_or(CliError::NotAList {
                actual: tree.type_name(),
            })?;
            let typed = T::expand(list)?;
            render(&typed, format)
        }
    }
}

fn render<S: Serialize>(value: &S, format: Format) -> Result<String, CliError> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)? + "\n",
    })
}

fn read_input(path: &str) -> Result<String, CliError> {
    let result = if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content).map(|_| content)
    } else {
        fs::read_to_string(PathBuf::from(path))
    };
    result.map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

fn write_output(path: &str, rendered: &str) -> Result<(), CliError> {
    let result = if path == "-" {
        io::stdout().write_all(rendered.as_bytes())
    } else {
        fs::write(PathBuf::from(path), rendered)
    };
    result.map_err(|source| CliError::Write {
        path: path.to_string(),
        source,
    })
}
