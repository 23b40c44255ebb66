// OS-probe contract consumed by the collectors

use crate::context::Context;
use crate::error::ProbeResult;
use crate::models::*;
use std::collections::BTreeMap;

/// Blocking, context-aware queries against the operating system, one per datum.
///
/// Implementations may block; collectors always call them from
/// `tokio::task::spawn_blocking`. Long-running implementations should poll
/// [`Context::is_done`] and return [`crate::error::ProbeError::Canceled`].
pub trait SystemProbe: Send + Sync + 'static {
    fn cpu_info(&self, ctx: &Context) -> ProbeResult<Vec<CpuInfoStat>>;
    /// Per-core utilization since the previous call; never sleeps to take a delta.
    fn cpu_percent(&self, ctx: &Context) -> ProbeResult<Vec<f64>>;
    fn cpu_times(&self, ctx: &Context) -> ProbeResult<Vec<CpuTimesStat>>;

    fn virtual_memory(&self, ctx: &Context) -> ProbeResult<VirtualMemoryStat>;
    fn swap_memory(&self, ctx: &Context) -> ProbeResult<SwapMemoryStat>;

    fn partitions(&self, ctx: &Context) -> ProbeResult<Vec<PartitionStat>>;
    fn disk_usage(&self, ctx: &Context, mountpoint: &str) -> ProbeResult<UsageStat>;
    fn disk_io_counters(&self, ctx: &Context) -> ProbeResult<BTreeMap<String, DiskIoCounters>>;

    fn net_interfaces(&self, ctx: &Context) -> ProbeResult<Vec<InterfaceStat>>;
    fn net_io_counters(&self, ctx: &Context) -> ProbeResult<Vec<NetIoCounters>>;
    fn net_connections(&self, ctx: &Context) -> ProbeResult<Vec<ConnectionStat>>;

    fn host_info(&self, ctx: &Context) -> ProbeResult<HostInfoStat>;
    fn temperatures(&self, ctx: &Context) -> ProbeResult<Vec<TemperatureStat>>;

    /// Lists live process ids and refreshes whatever per-process state the queries below read.
    fn pids(&self, ctx: &Context) -> ProbeResult<Vec<u32>>;
    fn process_name(&self, ctx: &Context, pid: u32) -> ProbeResult<String>;
    fn process_exe(&self, ctx: &Context, pid: u32) -> ProbeResult<String>;
    fn process_cmdline(&self, ctx: &Context, pid: u32) -> ProbeResult<String>;
    fn process_username(&self, ctx: &Context, pid: u32) -> ProbeResult<String>;
    fn process_status(&self, ctx: &Context, pid: u32) -> ProbeResult<String>;
    fn process_cpu_percent(&self, ctx: &Context, pid: u32) -> ProbeResult<f64>;
    fn process_memory_percent(&self, ctx: &Context, pid: u32) -> ProbeResult<f32>;
}
