//! Host, process, and network snapshots shown beside the log tail.

use anyhow::{Context, Result};

/// Sentinel shown when a snapshot lookup fails.
pub const UNKNOWN: &str = "Unknown";

/// Point-in-time system details rendered alongside the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshots {
    pub host_name: String,
    pub processes: String,
    pub network: String,
}

/// Read side of the snapshot commands; swapped for stubs in tests.
#[allow(async_fn_in_trait)]
pub trait SystemInspector {
    /// Resolved host display name.
    async fn host_name(&self) -> Result<String>;
    /// Processes whose command line contains `filter`.
    async fn process_listing(&self, filter: &str) -> Result<String>;
    /// Active non-loopback interfaces, one `mac TAB ip TAB name (device)`
    /// row per interface.
    async fn network_summary(&self) -> Result<String>;
}

/// Gather all three snapshots; any failing lookup degrades to `Unknown`
/// and never aborts the cycle.
pub async fn gather(inspector: &impl SystemInspector, process_filter: &str) -> SystemSnapshots {
    SystemSnapshots {
        host_name: sentinel(inspector.host_name().await, "host name"),
        processes: sentinel(inspector.process_listing(process_filter).await, "process listing"),
        network: sentinel(inspector.network_summary().await, "network summary"),
    }
}

fn sentinel(result: Result<String>, what: &str) -> String {
    match result {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(error = %error, "{} lookup failed", what);
            UNKNOWN.to_string()
        }
    }
}

/// Production inspector — shells out to the system utilities.
pub struct CommandInspector;

impl SystemInspector for CommandInspector {
    async fn host_name(&self) -> Result<String> {
        let text = run_capture("scutil", &["--get", "ComputerName"]).await?;
        Ok(text.trim().to_string())
    }

    async fn process_listing(&self, filter: &str) -> Result<String> {
        // pgrep exits nonzero when nothing matches; that surfaces as an
        // error here and the caller degrades it to the sentinel.
        let text = run_capture("pgrep", &["-fl", filter]).await?;
        Ok(text.trim_end().to_string())
    }

    async fn network_summary(&self) -> Result<String> {
        let ifconfig = run_capture("ifconfig", &[]).await?;
        let ports = match run_capture("networksetup", &["-listallhardwareports"]).await {
            Ok(text) => parse_hardware_ports(&text),
            Err(error) => {
                tracing::debug!(error = %error, "hardware port listing failed");
                Vec::new()
            }
        };
        Ok(summarize(&parse_ifconfig(&ifconfig), &ports))
    }
}

async fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("failed to run {program}"))?;
    anyhow::ensure!(output.status.success(), "{program} exited with {}", output.status);
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// One `ifconfig` block, reduced to the fields the summary needs.
#[derive(Debug, PartialEq, Eq)]
struct Interface {
    device: String,
    loopback: bool,
    mac: Option<String>,
    ip: Option<String>,
}

/// Parse `ifconfig` output into interface blocks, keeping only active
/// (first IPv4 present) non-loopback interfaces.
fn parse_ifconfig(text: &str) -> Vec<Interface> {
    let mut interfaces: Vec<Interface> = Vec::new();
    for line in text.lines() {
        if line.starts_with(char::is_whitespace) {
            let Some(current) = interfaces.last_mut() else {
                continue;
            };
            let detail = line.trim_start();
            if let Some(rest) = detail.strip_prefix("ether ") {
                current.mac = rest.split_whitespace().next().map(String::from);
            } else if let Some(rest) = detail.strip_prefix("inet ") {
                if current.ip.is_none() {
                    current.ip = rest.split_whitespace().next().map(String::from);
                }
            }
        } else if let Some((device, flags)) = line.split_once(':') {
            interfaces.push(Interface {
                device: device.to_string(),
                loopback: flags.contains("LOOPBACK"),
                mac: None,
                ip: None,
            });
        }
    }
    interfaces.retain(|iface| !iface.loopback && iface.ip.is_some());
    interfaces
}

/// Parse `networksetup -listallhardwareports` into (device, friendly name).
fn parse_hardware_ports(text: &str) -> Vec<(String, String)> {
    let mut ports = Vec::new();
    let mut pending_name: Option<String> = None;
    for line in text.lines() {
        if let Some(name) = line.strip_prefix("Hardware Port: ") {
            pending_name = Some(name.trim().to_string());
        } else if let Some(device) = line.strip_prefix("Device: ") {
            if let Some(name) = pending_name.take() {
                ports.push((device.trim().to_string(), name));
            }
        }
    }
    ports
}

/// Join interfaces with friendly names, best-effort: a missing MAC renders
/// as `-` and a missing friendly name falls back to the BSD device name.
fn summarize(interfaces: &[Interface], ports: &[(String, String)]) -> String {
    interfaces
        .iter()
        .filter_map(|iface| {
            let ip = iface.ip.as_deref()?;
            let name = ports
                .iter()
                .find(|(device, _)| *device == iface.device)
                .map_or(iface.device.as_str(), |(_, name)| name.as_str());
            let mac = iface.mac.as_deref().unwrap_or("-");
            Some(format!("{mac}\t{ip}\t{name} ({})", iface.device))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    const IFCONFIG: &str = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\tinet 127.0.0.1 netmask 0xff000000
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether f0:18:98:5a:01:aa
\tinet6 fe80::1%en0 prefixlen 64 secured scopeid 0x8
\tinet 192.168.7.20 netmask 0xffffff00 broadcast 192.168.7.255
\tinet 192.168.7.21 netmask 0xffffff00 broadcast 192.168.7.255
bridge0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tinet 10.0.0.4 netmask 0xffffff00
en5: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether aa:bb:cc:dd:ee:ff
";

    const HARDWARE_PORTS: &str = "\
Hardware Port: Wi-Fi
Device: en0
Ethernet Address: f0:18:98:5a:01:aa

Hardware Port: Thunderbolt Bridge
Device: bridge0
Ethernet Address: N/A
";

    #[test]
    fn ifconfig_keeps_active_non_loopback_interfaces() {
        let interfaces = parse_ifconfig(IFCONFIG);
        assert_eq!(interfaces.len(), 2);
        assert_eq!(interfaces[0].device, "en0");
        assert_eq!(interfaces[0].mac.as_deref(), Some("f0:18:98:5a:01:aa"));
        assert_eq!(interfaces[0].ip.as_deref(), Some("192.168.7.20"), "first IPv4 wins");
        assert_eq!(interfaces[1].device, "bridge0");
        assert_eq!(interfaces[1].mac, None);
    }

    #[test]
    fn hardware_ports_pair_devices_with_names() {
        let ports = parse_hardware_ports(HARDWARE_PORTS);
        assert_eq!(
            ports,
            vec![
                ("en0".to_string(), "Wi-Fi".to_string()),
                ("bridge0".to_string(), "Thunderbolt Bridge".to_string()),
            ]
        );
    }

    #[test]
    fn summary_joins_names_and_degrades_missing_fields() {
        let interfaces = parse_ifconfig(IFCONFIG);
        let summary = summarize(&interfaces, &parse_hardware_ports(HARDWARE_PORTS));
        assert_eq!(
            summary,
            "f0:18:98:5a:01:aa\t192.168.7.20\tWi-Fi (en0)\n-\t10.0.0.4\tThunderbolt Bridge (bridge0)"
        );
    }

    #[test]
    fn summary_falls_back_to_device_name_without_port_listing() {
        let interfaces = parse_ifconfig(IFCONFIG);
        let summary = summarize(&interfaces, &[]);
        assert_eq!(
            summary,
            "f0:18:98:5a:01:aa\t192.168.7.20\ten0 (en0)\n-\t10.0.0.4\tbridge0 (bridge0)"
        );
    }

    struct FailingInspector;
    impl SystemInspector for FailingInspector {
        async fn host_name(&self) -> Result<String> {
            bail!("no lookup")
        }
        async fn process_listing(&self, _: &str) -> Result<String> {
            bail!("no lookup")
        }
        async fn network_summary(&self) -> Result<String> {
            bail!("no lookup")
        }
    }

    #[tokio::test]
    async fn gather_degrades_each_failure_to_unknown() {
        let snapshots = gather(&FailingInspector, "jamf").await;
        assert_eq!(snapshots.host_name, UNKNOWN);
        assert_eq!(snapshots.processes, UNKNOWN);
        assert_eq!(snapshots.network, UNKNOWN);
    }

    struct MixedInspector;
    impl SystemInspector for MixedInspector {
        async fn host_name(&self) -> Result<String> {
            Ok("Build Mac".to_string())
        }
        async fn process_listing(&self, filter: &str) -> Result<String> {
            Ok(format!("120 /usr/local/bin/{filter} policy"))
        }
        async fn network_summary(&self) -> Result<String> {
            bail!("ifconfig unavailable")
        }
    }

    #[tokio::test]
    async fn gather_keeps_successful_lookups_independent() {
        let snapshots = gather(&MixedInspector, "jamf").await;
        assert_eq!(snapshots.host_name, "Build Mac");
        assert_eq!(snapshots.processes, "120 /usr/local/bin/jamf policy");
        assert_eq!(snapshots.network, UNKNOWN);
    }
}
