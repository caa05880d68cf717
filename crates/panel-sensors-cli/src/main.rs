//! Panel Sensors Tool
//!
//! Polls custom data sources the way a display theme would and prints
//! their numeric, text and history views.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panel_sensors::{poll, Config, CustomDataSource, Numeric, Reading, SourceKind};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panel-sensors")]
#[command(about = "Poll custom data sources for system monitor themes")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available data sources
    List,
    /// Poll data sources and print their values
    Poll {
        /// Source names (default: sources from the configuration)
        sources: Vec<String>,

        /// Number of polls (0 polls until interrupted)
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Poll interval in milliseconds (default: from the configuration)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Print readings as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(filter.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path).context("Failed to load configuration")?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::List => {
            for kind in SourceKind::ALL {
                println!("{}", kind);
            }
        }
        Commands::Poll {
            sources,
            count,
            interval,
            json,
        } => {
            let names = if sources.is_empty() {
                config.sources.clone()
            } else {
                sources
            };
            let mut sources = build_sources(&names, &config)?;
            let interval = Duration::from_millis(interval.unwrap_or(config.poll));
            run_poll(&mut sources, count, interval, json)?;
        }
        Commands::Config => {
            let content =
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            print!("{}", content);
        }
    }

    Ok(())
}

fn build_sources(names: &[String], config: &Config) -> Result<Vec<Box<dyn CustomDataSource>>> {
    names
        .iter()
        .map(|name| -> Result<Box<dyn CustomDataSource>> {
            let kind: SourceKind = name.parse()?;
            let source = kind
                .build(config)
                .with_context(|| format!("Failed to create source {}", kind))?;
            debug!("Created source {}", kind);
            Ok(source)
        })
        .collect()
}

fn run_poll(
    sources: &mut [Box<dyn CustomDataSource>],
    count: u32,
    interval: Duration,
    json: bool,
) -> Result<()> {
    let mut tick: u32 = 0;
    loop {
        for source in sources.iter_mut() {
            let reading = poll(source.as_mut());
            if json {
                println!("{}", serde_json::to_string(&reading)?);
            } else {
                println!("{}", format_reading(&reading));
            }
        }

        if count != 0 {
            tick += 1;
            if tick >= count {
                return Ok(());
            }
        }
        std::thread::sleep(interval);
    }
}

fn format_reading(reading: &Reading) -> String {
    let history = reading
        .history
        .as_ref()
        .map(|values| {
            let values: Vec<String> = values
                .iter()
                .map(|v| if v.is_nan() { "-".to_string() } else { format!("{:.1}", v) })
                .collect();
            format!(" [{}]", values.join(" "))
        })
        .unwrap_or_default();

    format!(
        "{:<20} {:>10} {}{}",
        reading.source,
        format_numeric(reading),
        reading.text,
        history
    )
}

fn format_numeric(reading: &Reading) -> String {
    match &reading.numeric {
        Numeric::Fresh(v) => format!("{:.3}", v),
        Numeric::Unsupported => "n/a".to_string(),
        Numeric::Failed(_) => "error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reading() {
        let reading = Reading {
            source: "example_numeric".to_string(),
            numeric: Numeric::Fresh(75.845),
            text: " 75.8%".to_string(),
            history: Some(vec![f64::NAN, 75.845]),
        };
        let line = format_reading(&reading);
        assert!(line.starts_with("example_numeric"));
        assert!(line.contains("75.845"));
        assert!(line.ends_with(" 75.8% [- 75.8]"));
    }

    #[test]
    fn test_format_failed_reading() {
        let reading = Reading {
            source: "speedtest_ping".to_string(),
            numeric: Numeric::Failed("No results available yet".to_string()),
            text: "--ms".to_string(),
            history: None,
        };
        assert!(format_reading(&reading).ends_with("error --ms"));
    }

    struct Counter {
        polls: u32,
    }

    impl CustomDataSource for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn as_numeric(&mut self) -> panel_sensors::Result<Option<f64>> {
            self.polls += 1;
            Ok(Some(self.polls as f64))
        }

        fn as_string(&self) -> String {
            self.polls.to_string()
        }

        fn last_values(&self) -> Option<&[f64]> {
            None
        }
    }

    #[test]
    fn test_run_poll_stops_after_count() {
        let mut sources: Vec<Box<dyn CustomDataSource>> = vec![Box::new(Counter { polls: 0 })];
        run_poll(&mut sources, 3, Duration::ZERO, false).unwrap();
        assert_eq!(sources[0].as_string(), "3");
    }

    #[test]
    fn test_unknown_source_name() {
        let names = vec!["nope".to_string()];
        assert!(build_sources(&names, &Config::default()).is_err());
    }
}
