// Host identity and sensor models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInfoStat {
    pub hostname: String,
    pub uptime: u64,
    pub boot_time: u64,
    pub procs: u64,
    pub os: String,
    pub platform: String,
    pub platform_version: String,
    pub kernel_version: String,
    pub kernel_arch: String,
    pub host_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStat {
    pub sensor_key: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub high: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub info: HostInfoStat,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensors: Vec<TemperatureStat>,
}
