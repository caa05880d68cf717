//! Memory usage source.

use super::example::format_percent;
use crate::history::History;
use crate::{CustomDataSource, Result, SensorError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

const MEMINFO: &str = "/proc/meminfo";

/// RAM usage in percent, read from /proc/meminfo.
pub struct MemoryUsage {
    path: PathBuf,
    value: f64,
    history: History,
}

impl MemoryUsage {
    /// Creates a memory source reading the system meminfo.
    pub fn new() -> Self {
        Self::with_path(MEMINFO)
    }

    /// Creates a memory source reading a meminfo-formatted file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            value: f64::NAN,
            history: History::default(),
        }
    }

    fn read_usage(path: &Path) -> Result<f64> {
        let content = fs::read_to_string(path).map_err(|source| SensorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let total = field_kb(&content, "MemTotal:").ok_or(SensorError::MissingField("MemTotal"))?;
        let available =
            field_kb(&content, "MemAvailable:").ok_or(SensorError::MissingField("MemAvailable"))?;

        if total == 0 {
            return Err(SensorError::MissingField("MemTotal"));
        }
        let used = total.saturating_sub(available);
        Ok(100.0 * (used as f64 / total as f64))
    }
}

/// Parses a "Key:   1234 kB" line.
fn field_kb(content: &str, key: &str) -> Option<u64> {
    content
        .lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse().ok())
}

impl Default for MemoryUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDataSource for MemoryUsage {
    fn name(&self) -> &str {
        "memory_usage"
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        let result = Self::read_usage(&self.path);
        self.value = result.as_ref().copied().unwrap_or(f64::NAN);
        self.history.push(self.value);

        match result {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                error!("Error reading memory usage: {}", e);
                Err(e)
            }
        }
    }

    fn as_string(&self) -> String {
        format_percent(self.value)
    }

    fn last_values(&self) -> Option<&[f64]> {
        Some(self.history.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_LEN;

    const MEMINFO_SAMPLE: &str = "\
MemTotal:        8000000 kB
MemFree:          500000 kB
MemAvailable:    2000000 kB
Buffers:          100000 kB
";

    #[test]
    fn test_usage_from_meminfo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        fs::write(&path, MEMINFO_SAMPLE).unwrap();

        let mut source = MemoryUsage::with_path(&path);
        assert_eq!(source.as_numeric().unwrap(), Some(75.0));
        assert_eq!(source.as_string(), " 75.0%");
        assert_eq!(source.last_values().unwrap()[HISTORY_LEN - 1], 75.0);
    }

    #[test]
    fn test_missing_file_records_gap() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = MemoryUsage::with_path(dir.path().join("meminfo"));

        for _ in 0..3 {
            assert!(matches!(source.as_numeric(), Err(SensorError::Io { .. })));
        }
        let values = source.last_values().unwrap();
        assert_eq!(values.len(), HISTORY_LEN);
        assert!(values.iter().all(|v| v.is_nan()));
        assert_eq!(source.as_string(), "   --%");
    }

    #[test]
    fn test_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        fs::write(&path, "MemTotal: 100 kB\n").unwrap();

        let mut source = MemoryUsage::with_path(&path);
        assert!(matches!(
            source.as_numeric(),
            Err(SensorError::MissingField("MemAvailable"))
        ));
    }

    #[test]
    fn test_field_kb() {
        assert_eq!(field_kb(MEMINFO_SAMPLE, "MemFree:"), Some(500000));
        assert_eq!(field_kb(MEMINFO_SAMPLE, "SwapTotal:"), None);
    }
}
