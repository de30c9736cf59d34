use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

/// Directory the capture pipeline writes dumps to, relative to the working dir.
pub const DEFAULT_DUMP_DIR: &str = "debug_dumps";

/// Resolves the most recent UI dump captured for a device.
pub trait DumpLocator {
    fn latest(&self, device_serial: &str) -> Option<PathBuf>;
}

impl<F> DumpLocator for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn latest(&self, device_serial: &str) -> Option<PathBuf> {
        self(device_serial)
    }
}

/// File-name prefix for a device's dumps: `ui_dump_<serial>_` with `.` and `:`
/// replaced by `_` (so `192.168.5.76:5555` becomes `ui_dump_192_168_5_76_5555_`).
pub fn dump_file_prefix(device_serial: &str) -> String {
    format!("ui_dump_{}_", device_serial.replace(['.', ':'], "_"))
}

/// Longest segment read as an adb port when it follows a bare IPv4 prefix.
const MAX_PORT_DIGITS: usize = 5;

fn is_bare_ipv4(device_serial: &str) -> bool {
    let octets: Vec<&str> = device_serial.split('.').collect();
    octets.len() == 4
        && octets
            .iter()
            .all(|o| !o.is_empty() && o.len() <= 3 && o.bytes().all(|b| b.is_ascii_digit()))
}

/// Whether `file_name` is a dump captured for `device_serial`.
///
/// A bare IPv4 serial shares its prefix with the same host's `ip:port`
/// serials, so a remainder starting with a port segment (`5555_...`) belongs
/// to the port-qualified device, not to this one.
pub fn is_dump_for(device_serial: &str, file_name: &str) -> bool {
    let Some(rest) = file_name.strip_prefix(&dump_file_prefix(device_serial)) else {
        return false;
    };
    if !rest.ends_with(".xml") {
        return false;
    }
    if is_bare_ipv4(device_serial) {
        if let Some((head, _)) = rest.split_once('_') {
            let is_port = !head.is_empty()
                && head.len() <= MAX_PORT_DIGITS
                && head.bytes().all(|b| b.is_ascii_digit());
            if is_port {
                return false;
            }
        }
    }
    true
}

/// Locator for a directory of `ui_dump_<serial>_<suffix>.xml` captures.
#[derive(Debug, Clone)]
pub struct DirDumpLocator {
    dir: PathBuf,
}

impl DirDumpLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for DirDumpLocator {
    fn default() -> Self {
        Self::new(DEFAULT_DUMP_DIR)
    }
}

impl DumpLocator for DirDumpLocator {
    /// Newest matching file by modification time; ties go to the
    /// lexicographically greatest file name.
    fn latest(&self, device_serial: &str) -> Option<PathBuf> {
        let prefix = dump_file_prefix(device_serial);
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %self.dir.display(), error = %err, "dump directory unreadable");
                return None;
            }
        };

        let mut candidates: Vec<(SystemTime, String, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !is_dump_for(device_serial, &name) {
                    return None;
                }
                let meta = entry.metadata().ok()?;
                if !meta.is_file() {
                    return None;
                }
                let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((modified, name, entry.path()))
            })
            .collect();
        candidates.sort();

        let latest = candidates.pop().map(|(_, _, path)| path);
        debug!(device_serial, prefix = %prefix, found = ?latest, "dump lookup");
        latest
    }
}
