// Linux-specific readers: /proc, /etc, /sys. Parsers are platform-independent for tests.

use crate::error::{ProbeError, ProbeResult};
use crate::models::{ConnectionStat, CpuTimesStat, DiskIoCounters, SocketAddr};
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Kernel clock ticks per second for /proc/stat (USER_HZ).
const CLOCK_TICKS: f64 = 100.0;
const SECTOR_SIZE: u64 = 512;

#[cfg(target_os = "linux")]
fn read(path: &str) -> ProbeResult<String> {
    std::fs::read_to_string(path).map_err(|e| ProbeError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Distro display name from /etc/os-release (PRETTY_NAME, then NAME).
pub(super) fn read_os_pretty_name() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        return os_release_value(&content, "PRETTY_NAME")
            .or_else(|| os_release_value(&content, "NAME"));
    }
    #[cfg(not(target_os = "linux"))]
    None
}

fn os_release_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let v = line.strip_prefix(key)?.strip_prefix('=')?.trim_matches('"');
        (!v.is_empty()).then(|| v.to_string())
    })
}

/// Stable host identifier from /etc/machine-id.
pub(super) fn read_machine_id() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let v = std::fs::read_to_string("/etc/machine-id").ok()?;
        let v = v.trim();
        if v.is_empty() {
            return None;
        }
        Some(v.to_string())
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Read network interface link speed from /sys/class/net/<interface>/speed (Linux).
/// Returns speed in bits per second, or 0 if unavailable.
pub(super) fn get_interface_speed(interface_name: &str) -> u64 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/speed", interface_name);
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(mbps) = content.trim().parse::<i64>()
            && mbps > 0
        {
            return (mbps as u64) * 1_000_000;
        }
    }
    0
}

/// Link state from /sys/class/net/<interface>/operstate; `None` when unreadable.
pub(super) fn read_interface_up(interface_name: &str) -> Option<bool> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/operstate", interface_name);
        let state = std::fs::read_to_string(path).ok()?;
        // Loopback reports "unknown" while carrying traffic.
        return Some(matches!(state.trim(), "up" | "unknown"));
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface_name;
        None
    }
}

pub(super) fn read_cpu_times() -> ProbeResult<Vec<CpuTimesStat>> {
    #[cfg(target_os = "linux")]
    {
        let times = parse_cpu_times(&read("/proc/stat")?);
        if times.is_empty() {
            return Err(ProbeError::Parse {
                path: "/proc/stat".into(),
                message: "no per-cpu lines".into(),
            });
        }
        Ok(times)
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("per-cpu times"))
}

pub(super) fn read_disk_io_counters() -> ProbeResult<BTreeMap<String, DiskIoCounters>> {
    #[cfg(target_os = "linux")]
    {
        Ok(parse_diskstats(&read("/proc/diskstats")?))
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("disk io counters"))
}

/// All TCP and UDP sockets. /proc/net/tcp is required; the other tables are optional
/// (IPv6 may be disabled).
pub(super) fn read_connections() -> ProbeResult<Vec<ConnectionStat>> {
    #[cfg(target_os = "linux")]
    {
        let mut conns = parse_proc_net("tcp", &read("/proc/net/tcp")?);
        for kind in ["tcp6", "udp", "udp6"] {
            if let Ok(content) = read(&format!("/proc/net/{kind}")) {
                conns.extend(parse_proc_net(kind, &content));
            }
        }
        Ok(conns)
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("socket listing"))
}

/// Per-core lines of /proc/stat ("cpuN ..."), the aggregate "cpu" line skipped.
pub(crate) fn parse_cpu_times(content: &str) -> Vec<CpuTimesStat> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let label = fields.next()?;
            let index = label.strip_prefix("cpu")?;
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let ticks: Vec<f64> = fields
                .map(|f| f.parse::<f64>().unwrap_or(0.0) / CLOCK_TICKS)
                .collect();
            let at = |i: usize| ticks.get(i).copied().unwrap_or(0.0);
            Some(CpuTimesStat {
                cpu: label.to_string(),
                user: at(0),
                nice: at(1),
                system: at(2),
                idle: at(3),
                iowait: at(4),
                irq: at(5),
                softirq: at(6),
                steal: at(7),
                guest: at(8),
                guest_nice: at(9),
            })
        })
        .collect()
}

/// /proc/diskstats, skipping devices that never saw I/O.
pub(crate) fn parse_diskstats(content: &str) -> BTreeMap<String, DiskIoCounters> {
    let mut out = BTreeMap::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 14 {
            continue;
        }
        let n = |i: usize| fields[i].parse::<u64>().unwrap_or(0);
        let (reads, writes) = (n(3), n(7));
        if reads == 0 && writes == 0 {
            continue;
        }
        let name = fields[2].to_string();
        out.insert(
            name.clone(),
            DiskIoCounters {
                name,
                read_count: reads,
                merged_read_count: n(4),
                read_bytes: n(5).saturating_mul(SECTOR_SIZE),
                read_time: n(6),
                write_count: writes,
                merged_write_count: n(8),
                write_bytes: n(9).saturating_mul(SECTOR_SIZE),
                write_time: n(10),
                iops_in_progress: n(11),
                io_time: n(12),
                weighted_io: n(13),
            },
        );
    }
    out
}

/// One /proc/net/{tcp,tcp6,udp,udp6} table. Malformed rows are skipped.
pub(crate) fn parse_proc_net(kind: &str, content: &str) -> Vec<ConnectionStat> {
    let is_tcp = kind.starts_with("tcp");
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 10 {
                return None;
            }
            let status = if is_tcp {
                tcp_state(fields[3]).to_string()
            } else {
                "NONE".to_string()
            };
            Some(ConnectionStat {
                kind: kind.to_string(),
                laddr: decode_addr(fields[1])?,
                raddr: decode_addr(fields[2])?,
                status,
                uid: fields[7].parse().ok()?,
                inode: fields[9].parse().ok()?,
            })
        })
        .collect()
}

/// "0100007F:0035" -> 127.0.0.1:53. Address words are stored in host byte order.
fn decode_addr(raw: &str) -> Option<SocketAddr> {
    let (ip_hex, port_hex) = raw.split_once(':')?;
    let port = u16::from_str_radix(port_hex, 16).ok()?;
    let ip = match ip_hex.len() {
        8 => Ipv4Addr::from(u32::from_str_radix(ip_hex, 16).ok()?.to_le_bytes()).to_string(),
        32 => {
            let mut octets = [0u8; 16];
            for (i, chunk) in octets.chunks_mut(4).enumerate() {
                let word = u32::from_str_radix(ip_hex.get(i * 8..i * 8 + 8)?, 16).ok()?;
                chunk.copy_from_slice(&word.to_le_bytes());
            }
            Ipv6Addr::from(octets).to_string()
        }
        _ => return None,
    };
    Some(SocketAddr { ip, port })
}

fn tcp_state(code: &str) -> &'static str {
    match code {
        "01" => "ESTABLISHED",
        "02" => "SYN_SENT",
        "03" => "SYN_RECV",
        "04" => "FIN_WAIT1",
        "05" => "FIN_WAIT2",
        "06" => "TIME_WAIT",
        "07" => "CLOSE",
        "08" => "CLOSE_WAIT",
        "09" => "LAST_ACK",
        "0A" => "LISTEN",
        "0B" => "CLOSING",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROC_STAT: &str = "\
cpu  4705 356 584 3699 23 23 0 0 0 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 0 0
cpu1 1335 10 220 18000 5 0 3 7
intr 114930548 113199788 3 0 5 263 0 4
ctxt 1990473
";

    #[test]
    fn parse_cpu_times_skips_aggregate_line_and_scales_ticks() {
        let times = parse_cpu_times(PROC_STAT);
        assert_eq!(times.len(), 2);
        assert_eq!(times[0].cpu, "cpu0");
        assert_eq!(times[0].user, 13932.80);
        assert_eq!(times[0].idle, 133432.92);
        assert_eq!(times[1].cpu, "cpu1");
        assert_eq!(times[1].steal, 0.07);
        assert_eq!(times[1].guest, 0.0);
    }

    #[test]
    fn parse_diskstats_reads_counters_and_skips_idle_devices() {
        let content = "\
   8       0 sda 1200 30 48000 900 800 12 16000 400 0 1100 1300 0 0 0 0
   7       0 loop0 0 0 0 0 0 0 0 0 0 0 0
   8       1 sda1 10 0 80 5 2 0 16 1 0 6 6
";
        let io = parse_diskstats(content);
        assert_eq!(io.len(), 2);
        let sda = &io["sda"];
        assert_eq!(sda.read_count, 1200);
        assert_eq!(sda.read_bytes, 48000 * 512);
        assert_eq!(sda.write_bytes, 16000 * 512);
        assert_eq!(sda.weighted_io, 1300);
        assert!(!io.contains_key("loop0"));
    }

    #[test]
    fn parse_diskstats_saturates_huge_sector_counts() {
        let content =
            " 259 0 nvme0n1 5 0 18446744073709551615 1 3 0 40000000000000000 2 0 3 3\n";
        let io = parse_diskstats(content);
        let nvme = &io["nvme0n1"];
        assert_eq!(nvme.read_bytes, u64::MAX);
        assert_eq!(nvme.write_bytes, u64::MAX);
        assert_eq!(nvme.read_count, 5);
    }

    #[test]
    fn parse_proc_net_decodes_ipv4_tcp_rows() {
        let content = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 0100007F:0035 00000000:0000 0A 00000000:00000000 00:00000000 00000000   101        0 20914 1 0000000000000000 100 0 0 10 5
   1: 0F02000A:C8D2 22B1D9AC:01BB 01 00000000:00000000 02:000A7D8B 00000000  1000        0 44321 2 0000000000000000 20 4 30 10 -1
";
        let conns = parse_proc_net("tcp", content);
        assert_eq!(conns.len(), 2);
        assert_eq!(conns[0].laddr.ip, "127.0.0.1");
        assert_eq!(conns[0].laddr.port, 53);
        assert_eq!(conns[0].status, "LISTEN");
        assert_eq!(conns[0].uid, 101);
        assert_eq!(conns[1].laddr.ip, "10.0.2.15");
        assert_eq!(conns[1].raddr.port, 443);
        assert_eq!(conns[1].status, "ESTABLISHED");
        assert_eq!(conns[1].inode, 44321);
    }

    #[test]
    fn parse_proc_net_decodes_ipv6_and_marks_udp_stateless() {
        let content = "\
  sl  local_address                         remote_address                        st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode ref pointer drops
  0: 00000000000000000000000001000000:0222 00000000000000000000000000000000:0000 07 00000000:00000000 00:00000000 00000000     0        0 1234 2 0000000000000000 0
";
        let conns = parse_proc_net("udp6", content);
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].laddr.ip, "::1");
        assert_eq!(conns[0].laddr.port, 546);
        assert_eq!(conns[0].status, "NONE");
    }

    #[test]
    fn parse_proc_net_skips_malformed_rows() {
        let content = "header\n   0: garbage\n   1: ZZZZ:0035 00000000:0000 0A 0 0 0 0 0 0\n";
        assert!(parse_proc_net("tcp", content).is_empty());
    }

    #[test]
    fn os_release_prefers_exact_key() {
        let content = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n";
        assert_eq!(
            os_release_value(content, "PRETTY_NAME").as_deref(),
            Some("Debian GNU/Linux 12 (bookworm)")
        );
        assert_eq!(
            os_release_value(content, "NAME").as_deref(),
            Some("Debian GNU/Linux")
        );
        assert_eq!(os_release_value(content, "VERSION_ID"), None);
    }
}
