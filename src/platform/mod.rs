//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (folded into an `InputState` snapshot between frames)
//! - Frame scheduling (`requestAnimationFrame` on web, manual elsewhere)
//! - DOM HUD (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::TickInput;

/// Directional key meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Map a `KeyboardEvent.key` value to a paddle direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "Left" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "Right" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Latest input, written by event handlers and read once per tick.
///
/// Event handlers only ever touch this snapshot, never the entities.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    target_x: Option<f32>,
    left: bool,
    right: bool,
    autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved; `x` in playfield coordinates
    pub fn set_paddle_target(&mut self, x: f32) {
        self.target_x = Some(x);
    }

    pub fn set_direction(&mut self, left: bool, right: bool) {
        self.left = left;
        self.right = right;
    }

    /// Key down (`held = true`) or key up for one direction
    pub fn set_held(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    /// Flip demo mode, returning the new value
    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot
    }

    /// Snapshot for the next tick. The pointer target is consumed; held keys
    /// and autopilot persist until released.
    pub fn tick_input(&mut self) -> TickInput {
        TickInput {
            target_x: self.target_x.take(),
            left: self.left,
            right: self.right,
            autopilot: self.autopilot,
        }
    }

    /// Drop pending pointer input and release held keys
    pub fn reset(&mut self) {
        self.target_x = None;
        self.left = false;
        self.right = false;
    }
}

/// Opaque id of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Frame scheduling capability provided by the host
pub trait FrameScheduler {
    /// Ask for one frame callback. `None` if the host could not schedule.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: frames fire when the owner says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    /// Every handle ever cancelled
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests still waiting to fire
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Fire the oldest pending request, removing it
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}
