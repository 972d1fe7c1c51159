use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, MouseScrollDelta, WindowEvent},
};

use super::fly_camera::FlyCamera;

/// Routes raw mouse motion and wheel events to a [`FlyCamera`].
///
/// The cursor is grabbed while the viewer runs, so window cursor positions
/// stop at the window edge (confined) or freeze (locked). Raw motion deltas
/// are accumulated into an unbounded virtual pointer instead, and that
/// position drives the camera.
pub struct CameraController {
    /// Pixel-precise wheels (touchpads) report pixels instead of lines.
    pub pixels_per_line: f32,
    virtual_pointer: (f64, f64),
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl CameraController {
    pub fn new(pixels_per_line: f32) -> Self {
        Self {
            pixels_per_line: pixels_per_line.max(1.0),
            virtual_pointer: (0.0, 0.0),
        }
    }

    /// Accumulated raw mouse motion, in device units
    pub fn virtual_pointer(&self) -> (f64, f64) {
        self.virtual_pointer
    }

    /// Applies raw device motion to `camera`. Returns true if the event was consumed.
    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut FlyCamera) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                self.process_motion(delta.0, delta.1, camera);
                true
            }
            _ => false,
        }
    }

    /// Moves the virtual pointer by `(dx, dy)` and feeds it to `camera`
    pub fn process_motion(&mut self, dx: f64, dy: f64, camera: &mut FlyCamera) {
        self.virtual_pointer.0 += dx;
        self.virtual_pointer.1 += dy;
        camera.on_pointer_move(self.virtual_pointer.0 as f32, self.virtual_pointer.1 as f32);
    }

    /// Applies wheel and focus window events to `camera`.
    /// Returns true if the event was consumed.
    pub fn process_events(&self, event: &WindowEvent, camera: &mut FlyCamera) -> bool {
        match event {
            WindowEvent::MouseWheel { delta, .. } => {
                camera.on_scroll(self.scroll_lines(delta));
                true
            }
            WindowEvent::Focused(true) | WindowEvent::CursorEntered { .. } => {
                camera.reset_pointer();
                false
            }
            _ => false,
        }
    }

    /// Wheel delta in lines, positive when scrolling away from the user
    pub fn scroll_lines(&self, delta: &MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                *y as f32 / self.pixels_per_line
            }
        }
    }
}
