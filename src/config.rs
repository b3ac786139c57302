//! Histogram configuration.
//!
//! A [`Config`] holds the three values that fully determine a histogram's layout. It can be built
//! in code or deserialized from any format `serde` supports, so that the range and precision of a
//! latency histogram can live next to the rest of an application's settings:
//!
//! ```
//! use hdrfixed::{Config, Histogram};
//!
//! let config = Config::new(1, 30_000_000, 2);
//! let hist = Histogram::<u64>::from_config(&config).unwrap();
//! assert_eq!(hist.layout().sub_bucket_count(), 256);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::layout::Layout;
use crate::errors::CreationError;

/// The configuration of a histogram.
///
/// Missing fields take their value from [`Config::default`] when deserializing; unknown fields
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The lowest value that can be recorded. Must be `>= 1`.
    pub lowest_trackable_value: u64,
    /// The highest value to be tracked. Must be `>= 2 * lowest_trackable_value`.
    pub highest_trackable_value: u64,
    /// The number of significant decimal digits to keep. Must be in `[1, 5]`.
    pub significant_figures: u8,
}

impl Default for Config {
    /// One microsecond to one hour, at three significant digits.
    fn default() -> Self {
        Config {
            lowest_trackable_value: 1,
            highest_trackable_value: 60 * 60 * 1000 * 1000,
            significant_figures: 3,
        }
    }
}

impl Config {
    /// Create a configuration from its three parts. Nothing is validated until
    /// [`Config::layout`] is called.
    pub fn new(low: u64, high: u64, sigfig: u8) -> Config {
        Config {
            lowest_trackable_value: low,
            highest_trackable_value: high,
            significant_figures: sigfig,
        }
    }

    /// Validate this configuration and derive the layout it describes.
    pub fn layout(&self) -> Result<Layout, CreationError> {
        Layout::new(
            self.lowest_trackable_value,
            self.highest_trackable_value,
            self.significant_figures,
        )
    }
}

impl From<&Layout> for Config {
    fn from(layout: &Layout) -> Self {
        Config::new(
            layout.lowest_trackable_value(),
            layout.highest_trackable_value(),
            layout.significant_figures(),
        )
    }
}
