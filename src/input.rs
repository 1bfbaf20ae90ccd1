// Pointer drag bookkeeping for the orbit camera.
// Pure glam only so the host tests can include it directly.

use glam::Vec2;

/// One active drag, accumulating movement until the next frame consumes it.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
    pub pending: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = pos;
    }

    /// Other pointers (a second finger, a pen hovering) are ignored.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2) {
        if !self.active || pointer_id != self.pointer_id || !pos.is_finite() {
            return;
        }
        self.pending += pos - self.last;
        self.last = pos;
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }

    /// Movement since the last call, in CSS pixels.
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }
}

/// New camera depth for one wheel notch; scrolling down moves away.
#[inline]
pub fn wheel_zoom(z_camera: f32, delta_y: f64, step: f32) -> f32 {
    if delta_y > 0.0 {
        z_camera + step
    } else if delta_y < 0.0 {
        z_camera - step
    } else {
        z_camera
    }
}
