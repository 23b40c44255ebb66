// Process listing models

use serde::{Deserialize, Serialize};

/// One observed process. Every field except `pid` is best-effort and may be empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessBrief {
    pub pid: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exe: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cmdline: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub mem_percent: f32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcInfo {
    /// Number of processes observed, not the length of `top`.
    pub count: usize,
    /// Highest CPU consumers, descending.
    pub top: Vec<ProcessBrief>,
}

/// Sorts rows by CPU percent (descending, stable) and keeps the first `top_n`.
pub fn rank_processes(mut rows: Vec<ProcessBrief>, top_n: usize) -> ProcInfo {
    let count = rows.len();
    rows.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    rows.truncate(top_n.min(count));
    ProcInfo { count, top: rows }
}
