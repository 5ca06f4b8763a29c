use config_engine::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity metric supported by the DiskANN index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Metric {
    /// Squared Euclidean distance
    #[default]
    #[serde(rename = "L2")]
    L2,
    /// Inner product
    #[serde(rename = "IP")]
    Ip,
    /// Cosine similarity
    #[serde(rename = "COSINE")]
    Cosine,
}

impl Metric {
    /// Names accepted by the `metric_type` parameter
    pub const NAMES: [&'static str; 3] = ["L2", "IP", "COSINE"];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::L2 => "L2",
            Metric::Ip => "IP",
            Metric::Cosine => "COSINE",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "L2" => Ok(Metric::L2),
            "IP" => Ok(Metric::Ip),
            "COSINE" => Ok(Metric::Cosine),
            _ => Err(ConfigError::OutOfRange(format!(
                "metric type {} not supported. Valid options: L2, IP, COSINE",
                s
            ))),
        }
    }
}
