// Network interface, counter and socket models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStat {
    pub name: String,
    pub hardware_addr: String,
    pub addrs: Vec<String>,
    /// Link speed in bits per second, 0 if unknown.
    pub speed: u64,
    pub is_up: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetIoCounters {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketAddr {
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStat {
    /// `tcp`, `tcp6`, `udp` or `udp6`.
    pub kind: String,
    pub laddr: SocketAddr,
    pub raddr: SocketAddr,
    pub status: String,
    pub uid: u32,
    pub inode: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetInfo {
    pub interfaces: Vec<InterfaceStat>,
    pub io_counters: Vec<NetIoCounters>,
    /// Only present when requested and readable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ConnectionStat>>,
}
