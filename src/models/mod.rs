// Telemetry data model

mod cpu;
mod disk;
mod hash;
mod host;
mod memory;
mod network;
mod process;
mod snapshot;

pub use cpu::{CpuInfo, CpuInfoStat, CpuTimesStat};
pub use disk::{DiskInfo, DiskIoCounters, PartitionStat, UsageStat};
pub use hash::EntropyHash;
pub use host::{HostInfo, HostInfoStat, TemperatureStat};
pub use memory::{MemInfo, SwapMemoryStat, VirtualMemoryStat, used_percent};
pub use network::{ConnectionStat, InterfaceStat, NetInfo, NetIoCounters, SocketAddr};
pub use process::{ProcInfo, ProcessBrief, rank_processes};
pub use snapshot::Snapshot;
