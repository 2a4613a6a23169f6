use std::error::Error;
use std::path::Path;

use serde::Deserialize;

/// Demo runtime settings, loadable from a TOML file with CLI overrides on
/// top. Missing keys fall back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Grid cells per world unit; power of two recommended for quantization
    /// stability.
    pub resolution: i32,
    /// Producer steps to run.
    pub ticks: u32,
    /// RNG seed for the point producer.
    pub seed: u64,
    /// Half-extent of the cube the producer scatters points in.
    pub range: f32,
    /// Pause between producer steps, in milliseconds.
    pub tick_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            resolution: 2,
            ticks: 500,
            seed: 0xC0FFEE,
            range: 5.0,
            tick_ms: 5,
        }
    }
}

impl DemoConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)?;
                Ok(toml::from_str(&text)?)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: DemoConfig = toml::from_str("resolution = 4\nticks = 10").unwrap();
        assert_eq!(cfg.resolution, 4);
        assert_eq!(cfg.ticks, 10);
        assert_eq!(cfg.range, DemoConfig::default().range);
    }
}
