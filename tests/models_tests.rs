// Model serialization and ranking tests

use sysdash::models::*;

fn row(pid: u32, cpu_percent: f64) -> ProcessBrief {
    ProcessBrief {
        pid,
        name: format!("p{pid}"),
        cpu_percent,
        ..Default::default()
    }
}

#[test]
fn test_rank_processes_descending_and_stable() {
    let rows = vec![row(1, 5.0), row(2, 90.0), row(3, 10.0), row(4, 90.0)];
    let ranked = rank_processes(rows, 3);
    assert_eq!(ranked.count, 4);
    let pids: Vec<u32> = ranked.top.iter().map(|p| p.pid).collect();
    assert_eq!(pids, vec![2, 4, 3]);
}

#[test]
fn test_rank_processes_edge_sizes() {
    let ranked = rank_processes(vec![row(1, 1.0), row(2, 2.0)], 10);
    assert_eq!(ranked.top.len(), 2);
    assert_eq!(ranked.top[0].pid, 2);

    let empty = rank_processes(Vec::new(), 5);
    assert_eq!(empty.count, 0);
    assert!(empty.top.is_empty());

    let none = rank_processes(vec![row(1, 1.0)], 0);
    assert_eq!(none.count, 1);
    assert!(none.top.is_empty());
}

#[test]
fn test_used_percent() {
    assert_eq!(used_percent(25, 100), 25.0);
    assert_eq!(used_percent(5, 0), 0.0);
}

#[test]
fn test_process_brief_skips_empty_strings() {
    let json = serde_json::to_value(row(7, 1.5)).unwrap();
    assert_eq!(json["pid"], 7);
    assert_eq!(json["name"], "p7");
    assert!(json.get("exe").is_none());
    assert!(json.get("username").is_none());
    assert_eq!(json["cpu_percent"], 1.5);
}

#[test]
fn test_snapshot_field_names() {
    let snapshot = Snapshot {
        procs: Some(rank_processes(vec![row(1, 1.0)], 1)),
        ..Default::default()
    };
    assert_eq!(snapshot.present(), 1);
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["processes"]["count"], 1);
    assert!(json["cpu"].is_null());
    assert!(json.get("procs").is_none());
}

#[test]
fn test_net_info_omits_connections_when_absent() {
    let net = NetInfo {
        interfaces: Vec::new(),
        io_counters: Vec::new(),
        connections: None,
    };
    let json = serde_json::to_value(&net).unwrap();
    assert!(json.get("connections").is_none());

    let with = NetInfo {
        connections: Some(Vec::new()),
        ..net
    };
    let json = serde_json::to_value(&with).unwrap();
    assert_eq!(json["connections"], serde_json::json!([]));
}

#[test]
fn test_host_info_omits_empty_sensors() {
    let host = HostInfo {
        info: HostInfoStat {
            hostname: "h".into(),
            ..Default::default()
        },
        sensors: Vec::new(),
    };
    let json = serde_json::to_value(&host).unwrap();
    assert_eq!(json["info"]["hostname"], "h");
    assert!(json.get("sensors").is_none());
}
