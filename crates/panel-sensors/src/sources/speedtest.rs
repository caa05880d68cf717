//! Speedtest results sources.
//!
//! Reads the JSON written by the Ookla CLI (`speedtest -f json > file`).
//! Only the fields shown on the display are parsed:
//!
//! ```json
//! {"download": {"bandwidth": 12345678}, "upload": {"bandwidth": 2345678},
//!  "ping": {"latency": 12.3}}
//! ```

use crate::{CustomDataSource, Result, SensorError, PLACEHOLDER};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Bandwidth is reported in bytes/s; dividing by this gives the displayed MBps.
const BANDWIDTH_DIVISOR: f64 = 125_000.0;

#[derive(Debug, Deserialize)]
struct Results {
    download: Option<Transfer>,
    upload: Option<Transfer>,
    ping: Option<Ping>,
}

#[derive(Debug, Deserialize)]
struct Transfer {
    bandwidth: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Ping {
    latency: Option<f64>,
}

/// Speedtest results file.
#[derive(Debug, Clone)]
pub struct SpeedtestLog {
    path: PathBuf,
}

impl SpeedtestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the results file.
    ///
    /// A `null` or empty document means no test has completed yet.
    fn read(&self) -> Result<Results> {
        let content = fs::read_to_string(&self.path).map_err(|source| SensorError::Io {
            path: self.path.clone(),
            source,
        })?;
        let results: Option<Results> = serde_json::from_str(&content)?;
        match results {
            Some(r) if r.download.is_some() || r.upload.is_some() || r.ping.is_some() => Ok(r),
            _ => Err(SensorError::NoResults),
        }
    }

    /// Returns the bandwidth of a transfer in bytes/s.
    fn bandwidth(&self, direction: Direction) -> Result<f64> {
        let results = self.read()?;
        let transfer = match direction {
            Direction::Download => results.download,
            Direction::Upload => results.upload,
        };
        transfer
            .and_then(|t| t.bandwidth)
            .ok_or(SensorError::MissingField(direction.field()))
    }

    /// Returns the ping latency in milliseconds.
    fn latency(&self) -> Result<f64> {
        self.read()?
            .ping
            .and_then(|p| p.latency)
            .ok_or(SensorError::MissingField("ping.latency"))
    }
}

/// Transfer direction measured by a speedtest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Download,
    Upload,
}

impl Direction {
    fn field(self) -> &'static str {
        match self {
            Direction::Download => "download.bandwidth",
            Direction::Upload => "upload.bandwidth",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Download => write!(f, "download"),
            Direction::Upload => write!(f, "upload"),
        }
    }
}

/// Download or upload throughput from the last speedtest, in MBps.
///
/// A failed read keeps the previous value on display.
pub struct SpeedtestThroughput {
    name: String,
    direction: Direction,
    log: SpeedtestLog,
    value: f64,
}

impl SpeedtestThroughput {
    pub fn new(direction: Direction, log: SpeedtestLog) -> Self {
        Self {
            name: format!("speedtest_{}", direction),
            direction,
            log,
            value: f64::NAN,
        }
    }

    pub fn download(log: SpeedtestLog) -> Self {
        Self::new(Direction::Download, log)
    }

    pub fn upload(log: SpeedtestLog) -> Self {
        Self::new(Direction::Upload, log)
    }
}

impl CustomDataSource for SpeedtestThroughput {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        match self.log.bandwidth(self.direction) {
            Ok(bandwidth) => {
                self.value = bandwidth / BANDWIDTH_DIVISOR;
                debug!("Speedtest {}: {} MBps", self.direction, self.value);
                Ok(Some(self.value))
            }
            Err(e) => {
                error!(
                    "Error with speedtest {} ({}): {}",
                    self.direction,
                    self.log.path().display(),
                    e
                );
                Err(e)
            }
        }
    }

    fn as_string(&self) -> String {
        if self.value.is_nan() {
            format!("{} MBps", PLACEHOLDER)
        } else {
            format!("{} MBps", self.value.trunc())
        }
    }

    fn last_values(&self) -> Option<&[f64]> {
        None
    }
}

/// Ping latency from the last speedtest, in milliseconds.
///
/// The value is reset on every fetch, so a failed read shows a placeholder.
pub struct SpeedtestPing {
    log: SpeedtestLog,
    value: f64,
}

impl SpeedtestPing {
    pub fn new(log: SpeedtestLog) -> Self {
        Self {
            log,
            value: f64::NAN,
        }
    }
}

impl CustomDataSource for SpeedtestPing {
    fn name(&self) -> &str {
        "speedtest_ping"
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        self.value = f64::NAN;
        match self.log.latency() {
            Ok(latency) => {
                self.value = latency;
                Ok(Some(latency))
            }
            Err(e) => {
                error!("Error with speedtest ping: {}", e);
                Err(e)
            }
        }
    }

    fn as_string(&self) -> String {
        if self.value.is_nan() {
            format!("{}ms", PLACEHOLDER)
        } else {
            format!("{:.1}ms", self.value)
        }
    }

    fn last_values(&self) -> Option<&[f64]> {
        None
    }
}
