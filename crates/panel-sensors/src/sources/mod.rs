//! Custom data source implementations.
//!
//! Any number of sources can be added here; each one needs a `SourceKind`
//! variant so that themes and the config can refer to it by name.

mod example;
mod memory;
mod speedtest;
mod vpn;

pub use example::{ExampleNumeric, ExampleTextOnly};
pub use memory::MemoryUsage;
pub use speedtest::{Direction, SpeedtestLog, SpeedtestPing, SpeedtestThroughput};
pub use vpn::{HttpOriginLookup, OriginLookup, VpnStatus};

use crate::{Config, CustomDataSource, Result, SensorError};
use std::str::FromStr;

/// Registered data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Constant value with a line graph history.
    ExampleNumeric,
    /// Operating system name and kernel release.
    ExampleText,
    /// Last speedtest download bandwidth.
    SpeedtestDownload,
    /// Last speedtest upload bandwidth.
    SpeedtestUpload,
    /// Last speedtest ping latency.
    SpeedtestPing,
    /// Whether the configured proxy exits through a tunnel.
    VpnStatus,
    /// RAM usage.
    MemoryUsage,
}

impl SourceKind {
    pub const ALL: [SourceKind; 7] = [
        SourceKind::ExampleNumeric,
        SourceKind::ExampleText,
        SourceKind::SpeedtestDownload,
        SourceKind::SpeedtestUpload,
        SourceKind::SpeedtestPing,
        SourceKind::VpnStatus,
        SourceKind::MemoryUsage,
    ];

    /// Creates a source of this kind.
    pub fn build(self, config: &Config) -> Result<Box<dyn CustomDataSource>> {
        let log = || SpeedtestLog::new(&config.speedtest.log_path);

        Ok(match self {
            SourceKind::ExampleNumeric => Box::new(ExampleNumeric::new()),
            SourceKind::ExampleText => Box::new(ExampleTextOnly::new()),
            SourceKind::SpeedtestDownload => Box::new(SpeedtestThroughput::download(log())),
            SourceKind::SpeedtestUpload => Box::new(SpeedtestThroughput::upload(log())),
            SourceKind::SpeedtestPing => Box::new(SpeedtestPing::new(log())),
            SourceKind::VpnStatus => {
                let lookup = HttpOriginLookup::new(&config.http, config.proxy.as_deref())?;
                Box::new(VpnStatus::new(Box::new(lookup)))
            }
            SourceKind::MemoryUsage => Box::new(MemoryUsage::new()),
        })
    }
}

impl FromStr for SourceKind {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "example_numeric" => Ok(SourceKind::ExampleNumeric),
            "example_text" => Ok(SourceKind::ExampleText),
            "speedtest_download" => Ok(SourceKind::SpeedtestDownload),
            "speedtest_upload" => Ok(SourceKind::SpeedtestUpload),
            "speedtest_ping" => Ok(SourceKind::SpeedtestPing),
            "vpn_status" => Ok(SourceKind::VpnStatus),
            "memory_usage" => Ok(SourceKind::MemoryUsage),
            _ => Err(SensorError::UnknownSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::ExampleNumeric => write!(f, "example_numeric"),
            SourceKind::ExampleText => write!(f, "example_text"),
            SourceKind::SpeedtestDownload => write!(f, "speedtest_download"),
            SourceKind::SpeedtestUpload => write!(f, "speedtest_upload"),
            SourceKind::SpeedtestPing => write!(f, "speedtest_ping"),
            SourceKind::VpnStatus => write!(f, "vpn_status"),
            SourceKind::MemoryUsage => write!(f, "memory_usage"),
        }
    }
}
