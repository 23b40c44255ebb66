// Shared test helpers: an in-memory probe with per-operation failure and latency injection

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;
use sysdash::context::Context;
use sysdash::error::{ProbeError, ProbeResult};
use sysdash::models::*;
use sysdash::probe::SystemProbe;

pub const MOUNTS: [&str; 2] = ["/", "/boot"];

pub struct FakeProbe {
    failing: HashSet<String>,
    slow: HashMap<String, Duration>,
    /// (pid, cpu percent)
    processes: Vec<(u32, f64)>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProbe {
    /// Four processes with CPU percents [5, 90, 10, 90].
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            slow: HashMap::new(),
            processes: vec![(1, 5.0), (2, 90.0), (3, 10.0), (4, 90.0)],
        }
    }

    /// Makes `operation` fail. Per-mount usage is `disk_usage:<mountpoint>`.
    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.insert(operation.to_string());
        self
    }

    /// Makes `operation` block for `delay` before answering.
    pub fn slow(mut self, operation: &str, delay: Duration) -> Self {
        self.slow.insert(operation.to_string(), delay);
        self
    }

    pub fn with_processes(mut self, cpu_percents: &[f64]) -> Self {
        self.processes = cpu_percents
            .iter()
            .enumerate()
            .map(|(i, cpu)| (i as u32 + 100, *cpu))
            .collect();
        self
    }

    fn check(&self, operation: &str) -> ProbeResult<()> {
        if let Some(delay) = self.slow.get(operation) {
            std::thread::sleep(*delay);
        }
        if self.failing.contains(operation) {
            return Err(ProbeError::NotFound(format!("injected {operation} failure")));
        }
        Ok(())
    }

    fn process(&self, operation: &str, pid: u32) -> ProbeResult<f64> {
        self.check(operation)?;
        self.processes
            .iter()
            .find(|(p, _)| *p == pid)
            .map(|(_, cpu)| *cpu)
            .ok_or(ProbeError::NoSuchProcess(pid))
    }
}

impl SystemProbe for FakeProbe {
    fn cpu_info(&self, _ctx: &Context) -> ProbeResult<Vec<CpuInfoStat>> {
        self.check("cpu_info")?;
        Ok((0..2)
            .map(|cpu| CpuInfoStat {
                cpu,
                vendor_id: "GenuineTest".into(),
                model_name: "Test CPU".into(),
                mhz: 2400.0,
                cores: 1,
            })
            .collect())
    }

    fn cpu_percent(&self, _ctx: &Context) -> ProbeResult<Vec<f64>> {
        self.check("cpu_percent")?;
        Ok(vec![12.5, 40.0])
    }

    fn cpu_times(&self, _ctx: &Context) -> ProbeResult<Vec<CpuTimesStat>> {
        self.check("cpu_times")?;
        Ok(vec![
            CpuTimesStat {
                cpu: "cpu0".into(),
                user: 100.0,
                idle: 900.0,
                ..Default::default()
            },
            CpuTimesStat {
                cpu: "cpu1".into(),
                user: 50.0,
                idle: 950.0,
                ..Default::default()
            },
        ])
    }

    fn virtual_memory(&self, _ctx: &Context) -> ProbeResult<VirtualMemoryStat> {
        self.check("virtual_memory")?;
        Ok(VirtualMemoryStat {
            total: 8 << 30,
            available: 6 << 30,
            used: 2 << 30,
            free: 5 << 30,
            used_percent: 25.0,
        })
    }

    fn swap_memory(&self, _ctx: &Context) -> ProbeResult<SwapMemoryStat> {
        self.check("swap_memory")?;
        Ok(SwapMemoryStat {
            total: 1 << 30,
            used: 0,
            free: 1 << 30,
            used_percent: 0.0,
        })
    }

    fn partitions(&self, _ctx: &Context) -> ProbeResult<Vec<PartitionStat>> {
        self.check("partitions")?;
        Ok(MOUNTS
            .iter()
            .enumerate()
            .map(|(i, m)| PartitionStat {
                device: format!("/dev/sda{}", i + 1),
                mountpoint: m.to_string(),
                fstype: "ext4".into(),
                removable: false,
            })
            .collect())
    }

    fn disk_usage(&self, _ctx: &Context, mountpoint: &str) -> ProbeResult<UsageStat> {
        self.check("disk_usage")?;
        self.check(&format!("disk_usage:{mountpoint}"))?;
        Ok(UsageStat {
            path: mountpoint.to_string(),
            fstype: "ext4".into(),
            total: 100,
            free: 60,
            used: 40,
            used_percent: 40.0,
        })
    }

    fn disk_io_counters(&self, _ctx: &Context) -> ProbeResult<BTreeMap<String, DiskIoCounters>> {
        self.check("disk_io_counters")?;
        let sda = DiskIoCounters {
            name: "sda".into(),
            read_count: 10,
            write_count: 5,
            ..Default::default()
        };
        Ok(BTreeMap::from([("sda".to_string(), sda)]))
    }

    fn net_interfaces(&self, _ctx: &Context) -> ProbeResult<Vec<InterfaceStat>> {
        self.check("net_interfaces")?;
        Ok(vec![InterfaceStat {
            name: "eth0".into(),
            hardware_addr: "02:00:00:00:00:01".into(),
            addrs: vec!["10.0.0.2/24".into()],
            speed: 1_000_000_000,
            is_up: true,
        }])
    }

    fn net_io_counters(&self, _ctx: &Context) -> ProbeResult<Vec<NetIoCounters>> {
        self.check("net_io_counters")?;
        Ok(vec![NetIoCounters {
            name: "eth0".into(),
            bytes_sent: 1000,
            bytes_recv: 2000,
            ..Default::default()
        }])
    }

    fn net_connections(&self, _ctx: &Context) -> ProbeResult<Vec<ConnectionStat>> {
        self.check("net_connections")?;
        Ok(vec![ConnectionStat {
            kind: "tcp".into(),
            laddr: SocketAddr {
                ip: "127.0.0.1".into(),
                port: 8080,
            },
            raddr: SocketAddr::default(),
            status: "LISTEN".into(),
            uid: 1000,
            inode: 42,
        }])
    }

    fn host_info(&self, _ctx: &Context) -> ProbeResult<HostInfoStat> {
        self.check("host_info")?;
        Ok(HostInfoStat {
            hostname: "testhost".into(),
            uptime: 3600,
            procs: self.processes.len() as u64,
            os: "linux".into(),
            ..Default::default()
        })
    }

    fn temperatures(&self, _ctx: &Context) -> ProbeResult<Vec<TemperatureStat>> {
        self.check("temperatures")?;
        Ok(vec![TemperatureStat {
            sensor_key: "coretemp".into(),
            temperature: 45.0,
            high: 80.0,
            critical: 100.0,
        }])
    }

    fn pids(&self, _ctx: &Context) -> ProbeResult<Vec<u32>> {
        self.check("pids")?;
        Ok(self.processes.iter().map(|(pid, _)| *pid).collect())
    }

    fn process_name(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.process("process_name", pid)?;
        Ok(format!("proc{pid}"))
    }

    fn process_exe(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.process("process_exe", pid)?;
        Ok(format!("/usr/bin/proc{pid}"))
    }

    fn process_cmdline(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.process("process_cmdline", pid)?;
        Ok(format!("proc{pid} --flag"))
    }

    fn process_username(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.process("process_username", pid)?;
        Ok("tester".into())
    }

    fn process_status(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.process("process_status", pid)?;
        Ok("Sleep".into())
    }

    fn process_cpu_percent(&self, _ctx: &Context, pid: u32) -> ProbeResult<f64> {
        self.process("process_cpu_percent", pid)
    }

    fn process_memory_percent(&self, _ctx: &Context, pid: u32) -> ProbeResult<f32> {
        self.process("process_memory_percent", pid)?;
        Ok(1.5)
    }
}
