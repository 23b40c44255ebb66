// System probe via sysinfo, with /proc readers for what sysinfo does not expose

mod linux;

use crate::context::Context;
use crate::error::{ProbeError, ProbeResult};
use crate::models::*;
use crate::probe::SystemProbe;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use sysinfo::{Components, Disks, Networks, Pid, Process, ProcessesToUpdate, System, Users};

pub struct SysinfoRepo {
    sys: Mutex<System>,
    disks: Mutex<Disks>,
    networks: Mutex<Networks>,
    users: Mutex<Users>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<'a, T>(m: &'a Mutex<T>, what: &str) -> ProbeResult<MutexGuard<'a, T>> {
    m.lock()
        .map_err(|e| ProbeError::Poisoned(format!("sysinfo {what}: {e}")))
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
            users: Mutex::new(Users::new_with_refreshed_list()),
        }
    }

    fn with_process<T>(
        &self,
        pid: u32,
        f: impl FnOnce(&Process, &System) -> ProbeResult<T>,
    ) -> ProbeResult<T> {
        let sys = lock(&self.sys, "system")?;
        let process = sys
            .process(Pid::from_u32(pid))
            .ok_or(ProbeError::NoSuchProcess(pid))?;
        f(process, &sys)
    }
}

impl SystemProbe for SysinfoRepo {
    fn cpu_info(&self, _ctx: &Context) -> ProbeResult<Vec<CpuInfoStat>> {
        let mut sys = lock(&self.sys, "system")?;
        sys.refresh_cpu_frequency();
        if sys.cpus().is_empty() {
            return Err(ProbeError::NotFound("cpu info".into()));
        }
        let fallback_model = linux::read_cpu_model_linux();
        Ok(sys
            .cpus()
            .iter()
            .enumerate()
            .map(|(i, c)| CpuInfoStat {
                cpu: i as u32,
                vendor_id: c.vendor_id().to_string(),
                model_name: Some(c.brand())
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
                    .or_else(|| fallback_model.clone())
                    .unwrap_or_else(|| "Unknown".into()),
                mhz: c.frequency() as f64,
                cores: 1,
            })
            .collect())
    }

    fn cpu_percent(&self, _ctx: &Context) -> ProbeResult<Vec<f64>> {
        let mut sys = lock(&self.sys, "system")?;
        // Usage since the previous refresh; the first call after startup reads 0.
        sys.refresh_cpu_usage();
        Ok(sys
            .cpus()
            .iter()
            .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
            .collect())
    }

    fn cpu_times(&self, _ctx: &Context) -> ProbeResult<Vec<CpuTimesStat>> {
        linux::read_cpu_times()
    }

    fn virtual_memory(&self, _ctx: &Context) -> ProbeResult<VirtualMemoryStat> {
        let mut sys = lock(&self.sys, "system")?;
        sys.refresh_memory();
        let total = sys.total_memory();
        let available = sys.available_memory();
        let used = total.saturating_sub(available);
        Ok(VirtualMemoryStat {
            total,
            available,
            used,
            free: sys.free_memory(),
            used_percent: used_percent(used, total),
        })
    }

    fn swap_memory(&self, _ctx: &Context) -> ProbeResult<SwapMemoryStat> {
        let mut sys = lock(&self.sys, "system")?;
        sys.refresh_memory();
        let total = sys.total_swap();
        let used = sys.used_swap();
        Ok(SwapMemoryStat {
            total,
            used,
            free: sys.free_swap(),
            used_percent: used_percent(used, total),
        })
    }

    fn partitions(&self, _ctx: &Context) -> ProbeResult<Vec<PartitionStat>> {
        let mut disks = lock(&self.disks, "disks")?;
        disks.refresh(true);
        Ok(disks
            .list()
            .iter()
            .map(|d| PartitionStat {
                device: d.name().to_string_lossy().into_owned(),
                mountpoint: d.mount_point().to_string_lossy().into_owned(),
                fstype: d.file_system().to_string_lossy().into_owned(),
                removable: d.is_removable(),
            })
            .collect())
    }

    fn disk_usage(&self, _ctx: &Context, mountpoint: &str) -> ProbeResult<UsageStat> {
        let disks = lock(&self.disks, "disks")?;
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new(mountpoint))
            .ok_or_else(|| ProbeError::NotFound(format!("usage for {mountpoint}")))?;
        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        Ok(UsageStat {
            path: mountpoint.to_string(),
            fstype: disk.file_system().to_string_lossy().into_owned(),
            total,
            free,
            used,
            used_percent: used_percent(used, total),
        })
    }

    fn disk_io_counters(&self, _ctx: &Context) -> ProbeResult<BTreeMap<String, DiskIoCounters>> {
        linux::read_disk_io_counters()
    }

    fn net_interfaces(&self, _ctx: &Context) -> ProbeResult<Vec<InterfaceStat>> {
        let mut networks = lock(&self.networks, "networks")?;
        networks.refresh(true);
        let mut interfaces: Vec<InterfaceStat> = networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceStat {
                name: name.clone(),
                hardware_addr: data.mac_address().to_string(),
                addrs: data
                    .ip_networks()
                    .iter()
                    .map(|n| format!("{}/{}", n.addr, n.prefix))
                    .collect(),
                speed: linux::get_interface_speed(name),
                is_up: linux::read_interface_up(name).unwrap_or(true),
            })
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }

    fn net_io_counters(&self, _ctx: &Context) -> ProbeResult<Vec<NetIoCounters>> {
        let mut networks = lock(&self.networks, "networks")?;
        networks.refresh(true);
        let mut counters: Vec<NetIoCounters> = networks
            .list()
            .iter()
            .map(|(name, data)| NetIoCounters {
                name: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_recv: data.total_packets_received(),
                errin: data.total_errors_on_received(),
                errout: data.total_errors_on_transmitted(),
            })
            .collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }

    fn net_connections(&self, _ctx: &Context) -> ProbeResult<Vec<ConnectionStat>> {
        linux::read_connections()
    }

    fn host_info(&self, _ctx: &Context) -> ProbeResult<HostInfoStat> {
        let procs = lock(&self.sys, "system")?.processes().len() as u64;
        let hostname = System::host_name()
            .ok_or_else(|| ProbeError::NotFound("hostname".into()))?;
        Ok(HostInfoStat {
            hostname,
            uptime: System::uptime(),
            boot_time: System::boot_time(),
            procs,
            os: std::env::consts::OS.to_string(),
            platform: linux::read_os_pretty_name().unwrap_or_else(System::distribution_id),
            platform_version: System::os_version().unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_default(),
            kernel_arch: std::env::consts::ARCH.to_string(),
            host_id: linux::read_machine_id().unwrap_or_default(),
        })
    }

    fn temperatures(&self, _ctx: &Context) -> ProbeResult<Vec<TemperatureStat>> {
        let components = Components::new_with_refreshed_list();
        let sensors: Vec<TemperatureStat> = components
            .list()
            .iter()
            .filter_map(|c| {
                Some(TemperatureStat {
                    sensor_key: c.label().to_string(),
                    temperature: c.temperature()? as f64,
                    high: c.max().unwrap_or(0.0) as f64,
                    critical: c.critical().unwrap_or(0.0) as f64,
                })
            })
            .collect();
        if sensors.is_empty() {
            return Err(ProbeError::NotFound("temperature sensors".into()));
        }
        Ok(sensors)
    }

    fn pids(&self, ctx: &Context) -> ProbeResult<Vec<u32>> {
        let mut sys = lock(&self.sys, "system")?;
        if ctx.is_done() {
            return Err(ProbeError::Canceled);
        }
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        let mut pids: Vec<u32> = sys.processes().keys().map(|p| p.as_u32()).collect();
        pids.sort_unstable();
        Ok(pids)
    }

    fn process_name(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.with_process(pid, |p, _| Ok(p.name().to_string_lossy().into_owned()))
    }

    fn process_exe(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.with_process(pid, |p, _| {
            p.exe()
                .map(|e| e.to_string_lossy().into_owned())
                .ok_or_else(|| ProbeError::NotFound(format!("exe of {pid}")))
        })
    }

    fn process_cmdline(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.with_process(pid, |p, _| {
            Ok(p.cmd()
                .iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "))
        })
    }

    fn process_username(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        let uid = self.with_process(pid, |p, _| {
            p.user_id()
                .cloned()
                .ok_or_else(|| ProbeError::NotFound(format!("owner of {pid}")))
        })?;
        let users = lock(&self.users, "users")?;
        users
            .get_user_by_id(&uid)
            .map(|u| u.name().to_string())
            .ok_or_else(|| ProbeError::NotFound(format!("user of {pid}")))
    }

    fn process_status(&self, _ctx: &Context, pid: u32) -> ProbeResult<String> {
        self.with_process(pid, |p, _| Ok(p.status().to_string()))
    }

    fn process_cpu_percent(&self, _ctx: &Context, pid: u32) -> ProbeResult<f64> {
        self.with_process(pid, |p, _| Ok(p.cpu_usage() as f64))
    }

    fn process_memory_percent(&self, _ctx: &Context, pid: u32) -> ProbeResult<f32> {
        self.with_process(pid, |p, sys| {
            Ok(used_percent(p.memory(), sys.total_memory()) as f32)
        })
    }
}
