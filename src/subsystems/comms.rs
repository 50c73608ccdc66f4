use crate::body::LinkTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommsState {
    pub connected: bool,
    pub transmitting: bool,
    pub connections: u32,
    pub attempted_connections: u32,
    pub relay: Option<LinkTarget>,
}

/// Per-satellite link bookkeeping, rewritten by the relay network every tick.
#[derive(Debug, Clone)]
pub struct LinkState {
    state: CommsState,
}

impl LinkState {
    pub fn new() -> Self {
        Self {
            state: CommsState {
                connected: false,
                transmitting: false,
                connections: 0,
                attempted_connections: 0,
                relay: None,
            },
        }
    }

    /// Clears this tick's counters. The previous relay is kept.
    pub fn begin_tick(&mut self) {
        self.state.connected = false;
        self.state.connections = 0;
        self.state.attempted_connections = 0;
    }

    pub fn record_attempt(&mut self) {
        self.state.attempted_connections = self.state.attempted_connections.saturating_add(1);
    }

    pub fn connect(&mut self, target: LinkTarget) {
        self.state.connected = true;
        self.state.relay = Some(target);
        self.add_connection();
    }

    /// Counts a link carried for another satellite.
    pub fn add_connection(&mut self) {
        self.state.connections = self.state.connections.saturating_add(1);
    }

    pub fn finish_tick(&mut self) {
        self.state.transmitting = self.state.connected;
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    pub fn is_transmitting(&self) -> bool {
        self.state.transmitting
    }

    pub fn connections(&self) -> u32 {
        self.state.connections
    }

    pub fn attempted_connections(&self) -> u32 {
        self.state.attempted_connections
    }

    pub fn relay(&self) -> Option<LinkTarget> {
        self.state.relay
    }

    pub fn get_state(&self) -> CommsState {
        self.state
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}
