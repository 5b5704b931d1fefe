mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use corrlog::{compose_label, Payload, PayloadValue, Severity};

#[derive(Parser)]
#[command(name = "corrlog")]
#[command(about = "Emit labelled, correlated log records to the console and a rotating file")]
#[command(version)]
struct Cli {
    /// YAML file overriding the env-derived logging config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one record through the logger
    Emit {
        #[arg(short, long, default_value = "info")]
        level: Severity,
        /// Source path the label is derived from
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        method: Option<String>,
        /// Correlation id
        #[arg(long)]
        cid: String,
        #[arg(long)]
        message: String,
        /// Structured data as key=value; values are read as JSON when they parse
        #[arg(short, long = "data", value_parser = parse_data_pair)]
        data: Vec<(String, PayloadValue)>,
        #[arg(long)]
        file_level: Option<Severity>,
        #[arg(long)]
        console_level: Option<Severity>,
    },
    /// Print the label a source path would get
    Label {
        path: String,
        #[arg(short, long)]
        method: Option<String>,
    },
    /// Print the effective logging config as YAML
    Config,
}

fn parse_data_pair(raw: &str) -> Result<(String, PayloadValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(anyhow!("empty key in {raw:?}"));
    }
    let value = serde_json::from_str::<serde_json::Value>(value)
        .map(PayloadValue::from)
        .unwrap_or_else(|_| PayloadValue::Str(value.to_string()));
    Ok((key.to_string(), value))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Emit {
            level,
            source,
            method,
            cid,
            message,
            data,
            file_level,
            console_level,
        } => {
            let config = config::load(cli.config.as_deref())?;
            let logger = corrlog::init(config)?;
            if let Some(level) = file_level {
                logger.set_file_level(level);
            }
            if let Some(level) = console_level {
                logger.set_console_level(level);
            }
            let data = (!data.is_empty()).then(|| data.into_iter().collect::<Payload>());
            logger.log(level, &source, method.as_deref(), &cid, &message, data);
        }
        Commands::Label { path, method } => {
            println!("{}", compose_label(&path, method.as_deref()));
        }
        Commands::Config => {
            let config = config::load(cli.config.as_deref())?;
            print!("{}", corrlog_config::to_yaml(&config)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("corrlog: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_values_parse_as_json_when_possible() {
        assert_eq!(
            parse_data_pair("a=1").unwrap(),
            ("a".to_string(), PayloadValue::Int(1))
        );
        assert_eq!(
            parse_data_pair("ok=true").unwrap(),
            ("ok".to_string(), PayloadValue::Bool(true))
        );
        assert_eq!(
            parse_data_pair("user=alice").unwrap(),
            ("user".to_string(), PayloadValue::Str("alice".into()))
        );
        assert_eq!(
            parse_data_pair("expr=a=b").unwrap(),
            ("expr".to_string(), PayloadValue::Str("a=b".into()))
        );
    }

    #[test]
    fn test_data_pair_needs_a_key() {
        assert!(parse_data_pair("novalue").is_err());
        assert!(parse_data_pair("=1").is_err());
    }

    #[test]
    fn test_emit_arguments() {
        let cli = Cli::try_parse_from([
            "corrlog", "emit", "--level", "verbose", "--source", "src/api/users.rs",
            "--cid", "req-42", "--message", "started", "-d", "a=1", "--file-level", "error",
        ])
        .unwrap();
        let Commands::Emit { level, data, file_level, console_level, .. } = cli.command else {
            panic!("expected emit");
        };
        assert_eq!(level, Severity::Verbose);
        assert_eq!(data.len(), 1);
        assert_eq!(file_level, Some(Severity::Error));
        assert_eq!(console_level, None);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(Cli::try_parse_from([
            "corrlog", "emit", "--level", "fatal", "--source", "a.rs", "--cid", "c",
            "--message", "m",
        ])
        .is_err());
    }
}
