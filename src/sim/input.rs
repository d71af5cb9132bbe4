//! Per-frame input state
//!
//! Filled by whatever translates window events into logical actions, read by
//! the simulation step. Edge counters are cleared by the step once per frame.

/// A held/edge-counted button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses seen since the last frame
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    fn release(&mut self) {
        self.pressed = false;
    }
}

/// Logical actions the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TiltLeft,
    TiltRight,
    TiltUp,
    TiltDown,
    Restart,
    ToggleWind,
}

/// Key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    /// Full reset requested; consumed at the top of the next frame
    pub restart: bool,
    /// Wind disabled
    pub no_wind: bool,
}

impl InputState {
    /// Apply an action edge. Returns true if the edge was consumed.
    pub fn handle(&mut self, action: Action, edge: Edge) -> bool {
        match (action, edge) {
            (Action::TiltLeft, Edge::Pressed) => self.left.press(),
            (Action::TiltRight, Edge::Pressed) => self.right.press(),
            (Action::TiltUp, Edge::Pressed) => self.up.press(),
            (Action::TiltDown, Edge::Pressed) => self.down.press(),
            (Action::TiltLeft, Edge::Released) => self.left.release(),
            (Action::TiltRight, Edge::Released) => self.right.release(),
            (Action::TiltUp, Edge::Released) => self.up.release(),
            (Action::TiltDown, Edge::Released) => self.down.release(),
            (Action::Restart, Edge::Pressed) => self.restart = true,
            (Action::ToggleWind, Edge::Pressed) => self.no_wind = !self.no_wind,
            (Action::Restart | Action::ToggleWind, Edge::Released) => return false,
        }
        true
    }

    /// Signed yaw direction from left/right (-1, 0 or 1)
    pub fn yaw_axis(&self) -> f32 {
        axis(self.left.pressed, self.right.pressed)
    }

    /// Signed pitch direction from up/down (-1, 0 or 1)
    pub fn pitch_axis(&self) -> f32 {
        axis(self.up.pressed, self.down.pressed)
    }

    /// Reset edge counters (once per frame)
    pub fn clear_downs(&mut self) {
        self.left.downs = 0;
        self.right.downs = 0;
        self.up.downs = 0;
        self.down.downs = 0;
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}
