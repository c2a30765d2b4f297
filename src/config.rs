use crate::error::{Result, ViewError};
use crate::units::DataUnit;
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILE: &str = ".trafficview.toml";
const LEGACY_CONFIG_FILE: &str = ".nload";

/// Smallest anchor that keeps all five stat lines inside their region.
pub const MIN_ANCHOR_ROWS: usize = 5;

/// Placement constants of the full (graph) layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Fraction of the width where the stats column starts.
    #[serde(rename = "StatsColumnRatio")]
    pub stats_column_ratio: f64,

    /// Rows between the stat block's nominal row and the bottom of its region.
    #[serde(rename = "StatsAnchorRows")]
    pub stats_anchor_rows: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            stats_column_ratio: 0.7,
            stats_anchor_rows: 5,
        }
    }
}

/// Display options read by the device view on every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    #[serde(rename = "AverageWindow")]
    pub average_window: u32,

    /// Scale ceiling for incoming traffic in kBit/s, 0 = auto.
    #[serde(rename = "BarMaxIn")]
    pub max_incoming: u64,

    /// Scale ceiling for outgoing traffic in kBit/s, 0 = auto.
    #[serde(rename = "BarMaxOut")]
    pub max_outgoing: u64,

    #[serde(rename = "DataFormat")]
    pub data_format: String,

    /// Hide graphs and show incoming/outgoing stats side by side.
    #[serde(rename = "MultipleDevices")]
    pub multiple_devices: bool,

    #[serde(rename = "RefreshInterval")]
    pub refresh_interval: u64,

    #[serde(rename = "Layout")]
    pub layout: LayoutParams,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            average_window: 300,
            max_incoming: 0,
            max_outgoing: 0,
            data_format: "M".to_string(),
            multiple_devices: false,
            refresh_interval: 500,
            layout: LayoutParams::default(),
        }
    }
}

impl ViewConfig {
    /// Loads `~/.trafficview.toml`, falling back to nload's `~/.nload`, then
    /// to defaults.
    pub fn load() -> Result<Self> {
        match dirs::home_dir() {
            Some(home) => Self::load_from_home(&home),
            None => Ok(Self::default()),
        }
    }

    /// Same lookup as [`ViewConfig::load`] rooted at `home`.
    pub fn load_from_home(home: &Path) -> Result<Self> {
        let config = home.join(CONFIG_FILE);
        let legacy = home.join(LEGACY_CONFIG_FILE);

        if config.exists() {
            Self::load_from(&config)
        } else if legacy.exists() {
            let content = std::fs::read_to_string(legacy)?;
            let parsed = Self::parse_nload_format(&content);
            parsed.validate()?;
            Ok(parsed)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses nload's `Key="Value"` file. Unknown keys and unparsable values
    /// keep their defaults.
    pub fn parse_nload_format(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"');

                match key.trim() {
                    "AverageWindow" => config.average_window = value.parse().unwrap_or(300),
                    "BarMaxIn" => config.max_incoming = value.parse().unwrap_or(0),
                    "BarMaxOut" => config.max_outgoing = value.parse().unwrap_or(0),
                    "DataFormat" => config.data_format = value.to_string(),
                    "MultipleDevices" => {
                        config.multiple_devices = value.parse().unwrap_or(false)
                    }
                    "RefreshInterval" => config.refresh_interval = value.parse().unwrap_or(500),
                    _ => {}
                }
            }
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.layout.stats_column_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ViewError::Config(format!(
                "StatsColumnRatio must be in (0, 1], got {ratio}"
            )));
        }
        if self.layout.stats_anchor_rows < MIN_ANCHOR_ROWS {
            return Err(ViewError::Config(format!(
                "StatsAnchorRows must be at least {MIN_ANCHOR_ROWS}, got {}",
                self.layout.stats_anchor_rows
            )));
        }
        if DataUnit::from_string(&self.data_format).is_none() {
            return Err(ViewError::Config(format!(
                "Unknown DataFormat '{}'",
                self.data_format
            )));
        }
        if self.refresh_interval == 0 {
            return Err(ViewError::Config(
                "RefreshInterval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn get_data_unit(&self) -> DataUnit {
        DataUnit::from_string(&self.data_format).unwrap_or(DataUnit::MegaByte)
    }

    pub fn combined_view(&self) -> bool {
        self.multiple_devices
    }

    /// Configured incoming ceiling in bytes/s, `None` when auto-scaled.
    pub fn scale_ceiling_in(&self) -> Option<u64> {
        kbit_to_bytes(self.max_incoming)
    }

    /// Configured outgoing ceiling in bytes/s, `None` when auto-scaled.
    pub fn scale_ceiling_out(&self) -> Option<u64> {
        kbit_to_bytes(self.max_outgoing)
    }
}

fn kbit_to_bytes(kbit: u64) -> Option<u64> {
    let bytes = kbit.saturating_mul(1024) / 8;
    (bytes > 0).then_some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ViewConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.combined_view());
        assert_eq!(config.scale_ceiling_in(), None);
        assert_eq!(config.get_data_unit(), DataUnit::MegaByte);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = ViewConfig::from_toml_str("BarMaxIn = 8000\n").unwrap();
        assert_eq!(config.scale_ceiling_in(), Some(1_024_000));
        assert_eq!(config.scale_ceiling_out(), None);
        assert_eq!(config.layout, LayoutParams::default());
    }

    #[test]
    fn layout_table_overrides_constants() {
        let config = ViewConfig::from_toml_str(
            "MultipleDevices = true\n[Layout]\nStatsColumnRatio = 0.5\nStatsAnchorRows = 6\n",
        )
        .unwrap();
        assert!(config.combined_view());
        assert_eq!(config.layout.stats_column_ratio, 0.5);
        assert_eq!(config.layout.stats_anchor_rows, 6);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ViewConfig::from_toml_str("[Layout]\nStatsColumnRatio = 1.5\n").unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));

        let err = ViewConfig::from_toml_str("DataFormat = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown DataFormat"));

        let err = ViewConfig::from_toml_str("BarMaxIn = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ViewError::Parse(_)));
    }

    #[test]
    fn anchor_below_block_height_is_rejected() {
        for rows in 0..MIN_ANCHOR_ROWS {
            let toml = format!("[Layout]\nStatsAnchorRows = {rows}\n");
            let err = ViewConfig::from_toml_str(&toml).unwrap_err();
            assert!(err.to_string().contains("StatsAnchorRows"), "{rows}: {err}");
        }
        assert!(ViewConfig::from_toml_str("[Layout]\nStatsAnchorRows = 5\n").is_ok());
    }

    #[test]
    fn parses_nload_file() {
        let config = ViewConfig::parse_nload_format(
            "# nload settings\nBarMaxOut=\"2048\"\nDataFormat=\"H\"\nMultipleDevices=\"true\"\nRefreshInterval=\"oops\"\nUnknown=\"1\"\n",
        );
        assert_eq!(config.scale_ceiling_out(), Some(262_144));
        assert_eq!(config.get_data_unit(), DataUnit::HumanByte);
        assert!(config.multiple_devices);
        assert_eq!(config.refresh_interval, 500);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut expected = ViewConfig::default();
        expected.data_format = "k".to_string();
        expected.max_outgoing = 100;
        write!(file, "{}", expected.to_toml_string().unwrap()).unwrap();

        let loaded = ViewConfig::load_from(file.path()).unwrap();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn home_lookup_prefers_toml_over_nload_file() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(
            ViewConfig::load_from_home(home.path()).unwrap(),
            ViewConfig::default()
        );

        std::fs::write(home.path().join(".nload"), "DataFormat=\"k\"\n").unwrap();
        let legacy = ViewConfig::load_from_home(home.path()).unwrap();
        assert_eq!(legacy.get_data_unit(), DataUnit::KiloByte);

        std::fs::write(home.path().join(".trafficview.toml"), "DataFormat = \"g\"\n").unwrap();
        let config = ViewConfig::load_from_home(home.path()).unwrap();
        assert_eq!(config.get_data_unit(), DataUnit::GigaBit);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ViewError::Io(_)));
    }
}
