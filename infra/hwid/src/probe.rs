//! # Platform Probes
//!
//! Each supported operating system exposes one reasonably stable machine
//! identifier, but never through the same channel: Windows publishes the
//! SMBIOS product UUID via WMI, Linux distributions write a machine id file
//! during installation, and macOS exposes the platform UUID through the I/O
//! registry. [`PlatformProbe`] wraps those channels behind one enum so the
//! fingerprint derivation never needs OS-conditional branches of its own.
//!
//! Probes are strictly best-effort: every failure mode (missing binary,
//! denied read, malformed output, timeout) degrades to `None`. Refusing to
//! produce any identifier would block every validation attempt downstream.

use std::fs;
use std::process::Command;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Upper bound on a single probe subprocess.
///
/// The probe thread keeps waiting on the child, but the caller gives up and
/// falls back after this window. A hung `wmic`/`ioreg` therefore can no
/// longer wedge license validation.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Linux machine id locations, in preference order.
const LINUX_MACHINE_ID_PATHS: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// SMBIOS placeholder reported by boards without a burned-in product UUID.
const WINDOWS_NIL_UUID: &str = "FFFFFFFF-FFFF-FFFF-FFFF-FFFFFFFFFFFF";

/// A machine-identifier source, selected once at startup by detected OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformProbe {
    /// SMBIOS product UUID via `wmic csproduct get uuid`.
    Windows,
    /// Machine id file written by systemd or dbus.
    Linux,
    /// `IOPlatformUUID` from the I/O registry.
    MacOs,
    /// Unrecognized platform; yields no identifier.
    Fallback,
}

impl PlatformProbe {
    /// Selects the probe matching the running operating system.
    #[must_use]
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            other => {
                debug!(os = other, "no platform probe for this OS, using fallback");
                Self::Fallback
            },
        }
    }

    /// Returns the platform-specific stable machine identifier, if one can
    /// be obtained.
    ///
    /// Never errors: any probe failure is reported as `None` so the caller
    /// can degrade to a weaker fingerprint instead of refusing service.
    #[must_use]
    pub fn machine_uuid(&self) -> Option<String> {
        match self {
            Self::Windows => probe_command("wmic", &["csproduct", "get", "uuid"])
                .and_then(|raw| parse_wmic_uuid(&raw)),
            Self::Linux => LINUX_MACHINE_ID_PATHS.iter().find_map(|path| read_id_file(path)),
            Self::MacOs => probe_command("ioreg", &["-rd1", "-c", "IOPlatformExpertDevice"])
                .and_then(|raw| parse_ioreg_uuid(&raw)),
            Self::Fallback => None,
        }
    }

    /// Best-effort OS release string (kernel or product version).
    #[must_use]
    pub fn os_release(&self) -> Option<String> {
        match self {
            Self::Windows => probe_command("cmd", &["/c", "ver"]).map(|raw| raw.trim().to_owned()),
            Self::Linux => fs::read_to_string("/proc/sys/kernel/osrelease")
                .ok()
                .map(|raw| raw.trim().to_owned())
                .filter(|release| !release.is_empty())
                .or_else(|| probe_command("uname", &["-r"]).map(|raw| raw.trim().to_owned())),
            Self::MacOs => probe_command("sw_vers", &["-productVersion"])
                .map(|raw| raw.trim().to_owned()),
            Self::Fallback => None,
        }
    }
}

/// Runs a short-lived probe subprocess under [`PROBE_TIMEOUT`].
///
/// The child is waited on from a helper thread that reports over a channel.
/// On timeout the caller stops waiting and receives `None`; the helper
/// thread stays blocked until the child eventually exits.
fn probe_command(program: &str, args: &[&str]) -> Option<String> {
    let (tx, rx) = mpsc::channel();
    let program_owned = program.to_owned();
    let args_owned: Vec<String> = args.iter().map(|&arg| arg.to_owned()).collect();

    thread::spawn(move || {
        let output = Command::new(&program_owned).args(&args_owned).output();
        let _ = tx.send(output);
    });

    match rx.recv_timeout(PROBE_TIMEOUT) {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        },
        Ok(Ok(output)) => {
            debug!(program, status = %output.status, "platform probe exited unsuccessfully");
            None
        },
        Ok(Err(error)) => {
            debug!(program, %error, "platform probe could not be spawned");
            None
        },
        Err(_) => {
            warn!(program, timeout_secs = PROBE_TIMEOUT.as_secs(), "platform probe timed out");
            None
        },
    }
}

fn read_id_file(path: &str) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|raw| raw.trim().to_owned())
        .filter(|id| !id.is_empty())
}

/// Extracts the UUID from `wmic csproduct get uuid` output.
///
/// The output is a `UUID` header line followed by the value, padded with
/// whitespace and blank lines.
fn parse_wmic_uuid(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| !line.eq_ignore_ascii_case("UUID"))
        .filter(|uuid| !uuid.eq_ignore_ascii_case(WINDOWS_NIL_UUID))
        .map(str::to_owned)
}

/// Extracts `IOPlatformUUID` from `ioreg -rd1 -c IOPlatformExpertDevice`.
///
/// The relevant line has the shape `"IOPlatformUUID" = "XXXX-..."`; the
/// value is the second quoted string.
fn parse_ioreg_uuid(raw: &str) -> Option<String> {
    raw.lines()
        .find(|line| line.contains("IOPlatformUUID"))
        .and_then(|line| line.split('"').nth(3))
        .map(str::trim)
        .filter(|uuid| !uuid.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_running_os() {
        let expected = match std::env::consts::OS {
            "windows" => PlatformProbe::Windows,
            "linux" => PlatformProbe::Linux,
            "macos" => PlatformProbe::MacOs,
            _ => PlatformProbe::Fallback,
        };
        assert_eq!(PlatformProbe::detect(), expected);
    }

    #[test]
    fn fallback_probe_yields_nothing() {
        assert_eq!(PlatformProbe::Fallback.machine_uuid(), None);
        assert_eq!(PlatformProbe::Fallback.os_release(), None);
    }

    #[test]
    fn wmic_output_is_parsed() {
        let raw = "UUID\r\n4C4C4544-0042-3810-8057-B4C04F564433\r\n\r\n";
        assert_eq!(
            parse_wmic_uuid(raw).as_deref(),
            Some("4C4C4544-0042-3810-8057-B4C04F564433")
        );
    }

    #[test]
    fn wmic_placeholder_uuid_is_rejected() {
        let raw = "UUID\r\nFFFFFFFF-FFFF-FFFF-FFFF-FFFFFFFFFFFF\r\n";
        assert_eq!(parse_wmic_uuid(raw), None);
    }

    #[test]
    fn wmic_empty_output_is_rejected() {
        assert_eq!(parse_wmic_uuid("UUID\r\n\r\n"), None);
        assert_eq!(parse_wmic_uuid(""), None);
    }

    #[test]
    fn ioreg_output_is_parsed() {
        let raw = concat!(
            "+-o IOPlatformExpertDevice  <class IOPlatformExpertDevice>\n",
            "    \"IOPlatformSerialNumber\" = \"C02XXXXXXX\"\n",
            "    \"IOPlatformUUID\" = \"A1B2C3D4-E5F6-4711-8899-AABBCCDDEEFF\"\n",
        );
        assert_eq!(
            parse_ioreg_uuid(raw).as_deref(),
            Some("A1B2C3D4-E5F6-4711-8899-AABBCCDDEEFF")
        );
    }

    #[test]
    fn ioreg_without_uuid_line_is_rejected() {
        assert_eq!(parse_ioreg_uuid("+-o IOPlatformExpertDevice\n"), None);
    }
}
