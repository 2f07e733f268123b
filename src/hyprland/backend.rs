//! [`MonitorSource`] and [`LayoutSink`] implementations backed by Hyprland
//! IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.  Monitor discovery is the `j/monitors` JSON query; placement
//! uses the `keyword monitor` request, wrapped in `[[BATCH]]` when more
//! than one display is being repositioned so the compositor applies the
//! whole layout in one request.

use crate::layout::Placement;
use crate::monitor::{Monitor, PixelMode};
use crate::traits::{LayoutSink, MonitorSource};
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed monitor source and layout sink.
///
/// All communication happens over Hyprland's IPC socket.  No connection is
/// opened eagerly; each method call opens a short-lived request.  No child
/// processes are spawned.
pub struct HyprlandBackend;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl Default for HyprlandBackend {
    fn default() -> Self {
        Self
    }
}

impl HyprlandBackend {
    /// Create a new handle.
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw request to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Check a `keyword` reply.  Batched replies are the per-command `ok`s
/// concatenated, so strip every `ok` and require nothing else to remain.
fn check_ok(response: &str) -> Result<(), HyprlandError> {
    let leftover = response.replace("ok", "");
    if leftover.trim().is_empty() {
        Ok(())
    } else {
        Err(HyprlandError(format!("keyword error: {}", response.trim())))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
///
/// The mode fields are optional: a display the compositor could not fully
/// describe still yields a descriptor, just one without a usable mode.
#[derive(Deserialize)]
struct MonitorJson {
    name: String,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(rename = "refreshRate")]
    refresh_rate: Option<f64>,
    #[serde(default)]
    focused: bool,
}

impl From<MonitorJson> for Monitor {
    fn from(m: MonitorJson) -> Self {
        let mode = match (m.width, m.height, m.refresh_rate) {
            (Some(width), Some(height), Some(refresh)) => Some(PixelMode {
                width,
                height,
                refresh,
            }),
            _ => None,
        };
        Monitor {
            name: m.name,
            mode,
            focused: m.focused,
        }
    }
}

/// Build the request string for a set of placements.
///
/// A single placement is sent as a plain keyword request; two or more are
/// joined into one `[[BATCH]]` request so they are applied atomically.
fn placement_request(placements: &[Placement]) -> String {
    if placements.len() == 1 {
        format!("/keyword monitor {}", placements[0])
    } else {
        let commands: Vec<String> = placements
            .iter()
            .map(|p| format!("/keyword monitor {}", p))
            .collect();
        format!("[[BATCH]]{}", commands.join(";"))
    }
}

impl MonitorSource for HyprlandBackend {
    type Error = HyprlandError;

    fn monitors(&self) -> Result<Vec<Monitor>, HyprlandError> {
        let json = ipc_request("j/monitors")?;
        let monitors: Vec<MonitorJson> =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        Ok(monitors.into_iter().map(Monitor::from).collect())
    }
}

impl LayoutSink for HyprlandBackend {
    type Error = HyprlandError;

    fn apply(&self, placements: &[Placement]) -> Result<(), HyprlandError> {
        if placements.is_empty() {
            return Ok(());
        }
        let request = placement_request(placements);
        debug!("sending {}", request);
        let response = ipc_request(&request)?;
        check_ok(&response)
    }
}
