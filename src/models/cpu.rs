// CPU models

use serde::{Deserialize, Serialize};

/// Static description of one logical CPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfoStat {
    pub cpu: u32,
    pub vendor_id: String,
    pub model_name: String,
    pub mhz: f64,
    pub cores: u32,
}

/// Cumulative time accounting for one logical CPU, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuTimesStat {
    pub cpu: String,
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub idle: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub info: Vec<CpuInfoStat>,
    /// Instantaneous utilization per core (0..=100).
    pub percent: Vec<f64>,
    pub times: Vec<CpuTimesStat>,
}
