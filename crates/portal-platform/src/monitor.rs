//! Connectivity monitor: turns sensor samples into transition events.

use portal_types::event::ShellEvent;

use crate::services::ConnectivityService;

/// Edge detector over a [`ConnectivityService`].
///
/// The shell assumes it starts online, so the first sample only produces an
/// event when the device is already offline.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    last_online: bool,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self { last_online: true }
    }

    /// Last observed connectivity.
    pub fn is_online(&self) -> bool {
        self.last_online
    }

    /// Sample the sensor and return `ConnectivityChanged` on a transition.
    ///
    /// Sensor errors are treated as "no change".
    pub fn sample(&mut self, sensor: &dyn ConnectivityService) -> Option<ShellEvent> {
        let online = match sensor.is_online() {
            Ok(online) => online,
            Err(e) => {
                log::warn!("Connectivity sample failed: {e}");
                return None;
            },
        };
        if online == self.last_online {
            return None;
        }
        self.last_online = online;
        log::info!("Connectivity changed: {}", if online { "online" } else { "offline" });
        Some(ShellEvent::ConnectivityChanged { online })
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}
