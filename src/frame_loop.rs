//! # Frame Loop
//!
//! Owns the scene, clock and input state, and runs one frame at a time:
//!
//! 1. sample the clock (after checking for a pending exit request)
//! 2. apply held keys to the camera and the object transforms
//! 3. compute view and projection
//! 4. resolve every object's model matrix
//! 5. hand the matrices to a [`FrameSink`]
//!
//! Mouse motion and wheel events are applied to the camera as they arrive, so they
//! are already visible when a frame runs. The loop itself never touches the
//! GPU, which keeps it testable with a recording sink.

use cgmath::{Matrix4, Vector3};
use winit::{
    event::{DeviceEvent, WindowEvent},
    keyboard::KeyCode,
};

use crate::{
    clock::FrameClock,
    config::ViewerConfig,
    error::{SceneError, ViewerError},
    gfx::{camera::CameraController, scene::Scene},
    input::{InputState, KeyBindings},
};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrices {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub eye: Vector3<f32>,
    /// One model matrix per scene object, in index order.
    pub models: Vec<Matrix4<f32>>,
}

/// Consumer of a frame's matrices
pub trait FrameSink {
    fn present(&mut self, frame: &FrameMatrices) -> Result<(), ViewerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    ExitRequested,
}

pub struct FrameLoop {
    scene: Scene,
    clock: FrameClock,
    input: InputState,
    bindings: KeyBindings,
    controller: CameraController,
    aspect: f32,
    exit_requested: bool,
}

impl FrameLoop {
    pub fn new(config: &ViewerConfig) -> Result<Self, SceneError> {
        Ok(Self {
            scene: Scene::from_config(config)?,
            clock: FrameClock::new(),
            input: InputState::new(),
            bindings: config.bindings.clone(),
            controller: CameraController::default(),
            aspect: config.aspect_ratio(),
            exit_requested: false,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Routes a window event to the key state or the camera controller.
    /// Returns true if the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::KeyboardInput { .. } = event {
            let handled = self.input.handle_window_event(event);
            if self.input.is_held(self.bindings.exit) {
                self.request_exit();
            }
            return handled;
        }

        // Focus loss clears held keys; focus gain re-seeds the pointer.
        let key_state_changed = self.input.handle_window_event(event);
        self.controller.process_events(event, &mut self.scene.camera) || key_state_changed
    }

    /// Routes raw device input (mouse motion) to the camera controller
    pub fn handle_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller
            .process_device_event(event, &mut self.scene.camera)
    }

    /// Key transition without a winit event
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.input.set_key(key, pressed);
        if pressed && key == self.bindings.exit {
            self.request_exit();
        }
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("Exit requested");
        }
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Updates the projection aspect ratio. Zero sizes (minimised) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Runs one frame timed by the wall clock
    pub fn run_frame(&mut self, sink: &mut impl FrameSink) -> Result<FrameOutcome, ViewerError> {
        if self.exit_requested {
            return Ok(FrameOutcome::ExitRequested);
        }
        let delta_time = self.clock.tick();
        self.step(delta_time, sink)
    }

    /// Runs one frame with an explicit `delta_time` (seconds)
    pub fn step(
        &mut self,
        delta_time: f32,
        sink: &mut impl FrameSink,
    ) -> Result<FrameOutcome, ViewerError> {
        if self.exit_requested {
            return Ok(FrameOutcome::ExitRequested);
        }

        self.scene
            .apply_held_keys(&self.input, &self.bindings, delta_time.max(0.0));

        let frame = self.build_matrices();
        sink.present(&frame)?;
        Ok(FrameOutcome::Presented)
    }

    /// View, projection and model matrices for the current state
    pub fn build_matrices(&self) -> FrameMatrices {
        let camera = &self.scene.camera;
        FrameMatrices {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(self.aspect),
            eye: camera.position,
            models: self.scene.model_matrices(),
        }
    }
}
