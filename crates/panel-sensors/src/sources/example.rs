//! Example data sources showing the two shapes a source can take.

use crate::history::History;
use crate::{CustomDataSource, Result, PLACEHOLDER};
use std::ffi::CStr;

/// Example source with numeric and text values and a line graph history.
pub struct ExampleNumeric {
    value: f64,
    history: History,
}

impl ExampleNumeric {
    /// Value reported on every fetch.
    pub const VALUE: f64 = 75.845;

    pub fn new() -> Self {
        Self {
            value: f64::NAN,
            history: History::default(),
        }
    }
}

impl Default for ExampleNumeric {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDataSource for ExampleNumeric {
    fn name(&self) -> &str {
        "example_numeric"
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        self.value = Self::VALUE;
        self.history.push(self.value);
        Ok(Some(self.value))
    }

    fn as_string(&self) -> String {
        format_percent(self.value)
    }

    fn last_values(&self) -> Option<&[f64]> {
        Some(self.history.values())
    }
}

/// Formats a percentage padded to a fixed width, e.g. " 75.8%".
pub(crate) fn format_percent(value: f64) -> String {
    if value.is_nan() {
        format!("{:>5}%", PLACEHOLDER)
    } else {
        format!("{:>5.1}%", value)
    }
}

/// Example source that only has a text value: the running OS and kernel.
pub struct ExampleTextOnly {
    platform: String,
}

impl ExampleTextOnly {
    pub fn new() -> Self {
        Self {
            platform: platform_version().unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

impl Default for ExampleTextOnly {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDataSource for ExampleTextOnly {
    fn name(&self) -> &str {
        "example_text"
    }

    fn as_numeric(&mut self) -> Result<Option<f64>> {
        Ok(None)
    }

    fn as_string(&self) -> String {
        self.platform.clone()
    }

    fn last_values(&self) -> Option<&[f64]> {
        None
    }
}

/// Returns "<sysname>: <release>" from uname(2), e.g. "Linux: 6.8.0".
fn platform_version() -> Option<String> {
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };

    // SAFETY: uname fills the provided struct with NUL-terminated strings.
    if unsafe { libc::uname(&mut uts) } != 0 {
        return None;
    }

    // SAFETY: the fields were NUL-terminated by a successful uname call.
    let (sysname, release) = unsafe {
        (
            CStr::from_ptr(uts.sysname.as_ptr()).to_string_lossy(),
            CStr::from_ptr(uts.release.as_ptr()).to_string_lossy(),
        )
    };

    Some(format!("{}: {}", sysname, release))
}
