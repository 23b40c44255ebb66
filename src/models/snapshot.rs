// Aggregate snapshot of all domains

use serde::Serialize;

use super::{CpuInfo, DiskInfo, HostInfo, MemInfo, NetInfo, ProcInfo};

/// One aggregate collection pass. A `None` field means that domain failed in this pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub cpu: Option<CpuInfo>,
    pub mem: Option<MemInfo>,
    pub disk: Option<DiskInfo>,
    pub net: Option<NetInfo>,
    pub host: Option<HostInfo>,
    #[serde(rename = "processes")]
    pub procs: Option<ProcInfo>,
}

impl Snapshot {
    /// Number of domains present in this snapshot.
    pub fn present(&self) -> usize {
        [
            self.cpu.is_some(),
            self.mem.is_some(),
            self.disk.is_some(),
            self.net.is_some(),
            self.host.is_some(),
            self.procs.is_some(),
        ]
        .into_iter()
        .filter(|p| *p)
        .count()
    }
}
