//! The render loop controller.
//!
//! ```text
//! Uninitialized --prepare--> Ready --run--> Running --close--> Closing --finish--> Closed
//! ```
//!
//! Every frame renders the same static image: poll, check whether to close, clear to
//! [`BACKGROUND`], draw the scene, present. There's no timing and no animation state.

use log::{debug, info};

use crate::config::BACKGROUND;
use crate::device::Device;
use crate::error::SceneError;
use crate::surface::{Key, Surface, SurfaceEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Uninitialized,
    Ready,
    Running,
    Closing,
    Closed
}

/// The GPU resources a demo draws every frame.
pub trait Scene: Sized {
    const NAME: &'static str;

    /// Builds everything the scene needs. Any error here is fatal for the demo.
    fn setup<D: Device>(device: &mut D) -> Result<Self, SceneError>;

    fn draw<D: Device>(&self, device: &mut D);

    fn release<D: Device>(self, device: &mut D);
}

pub struct RenderLoop<S, D> {
    surface: S,
    device: D,
    state: RenderState,
    frames: u64,
    events: Vec<SurfaceEvent>,
}

impl<S: Surface, D: Device> RenderLoop<S, D>
where
    S::Error: From<SceneError>
{
    pub fn new(surface: S, device: D) -> Self {
        Self {
            surface,
            device,
            state: RenderState::Uninitialized,
            frames: 0,
            events: Vec::new()
        }
    }

    pub fn state(&self) -> RenderState { self.state }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 { self.frames }

    pub fn surface(&self) -> &S { &self.surface }

    pub fn device(&self) -> &D { &self.device }

    pub fn prepare<Sc: Scene>(&mut self) -> Result<Sc, SceneError> {
        self.prepare_with(Sc::setup)
    }

    /// Like [`RenderLoop::prepare`] but with a custom setup step.
    pub fn prepare_with<Sc, F>(&mut self, setup: F) -> Result<Sc, SceneError>
    where
        Sc: Scene,
        F: FnOnce(&mut D) -> Result<Sc, SceneError>
    {
        self.expect_state(RenderState::Uninitialized)?;

        let scene = setup(&mut self.device)?;
        self.state = RenderState::Ready;
        info!("{} ready", Sc::NAME);

        Ok(scene)
    }

    /// Runs frames until the surface should close.
    pub fn run<Sc: Scene>(&mut self, scene: &Sc) -> Result<(), S::Error> {
        self.expect_state(RenderState::Ready)?;
        self.state = RenderState::Running;

        while self.frame(scene)? {}

        info!("Closing after {} frames", self.frames);
        Ok(())
    }

    /// Releases the scene's GPU objects. The context itself goes away with the surface.
    pub fn finish<Sc: Scene>(&mut self, scene: Sc) -> Result<(), SceneError> {
        self.expect_state(RenderState::Closing)?;

        scene.release(&mut self.device);
        self.state = RenderState::Closed;

        Ok(())
    }

    /// One iteration of the loop. Returns `false` once the loop is closing.
    fn frame<Sc: Scene>(&mut self, scene: &Sc) -> Result<bool, S::Error> {
        self.surface.poll_events(&mut self.events);
        for event in self.events.drain(..) {
            if let SurfaceEvent::Resized { width, height } = event {
                debug!("Resized to {}x{}", width, height);
                self.device.viewport(0, 0, width as i32, height as i32);
            }
        }

        // The window doesn't close itself on Escape
        if self.surface.is_key_pressed(Key::Escape) {
            self.surface.set_should_close(true);
        }

        if self.surface.should_close() {
            self.state = RenderState::Closing;
            return Ok(false);
        }

        self.device.clear_color(BACKGROUND);
        self.device.clear();
        scene.draw(&mut self.device);

        self.surface.present()?;
        self.frames += 1;

        Ok(true)
    }

    fn expect_state(&self, expected: RenderState) -> Result<(), SceneError> {
        if self.state != expected {
            return Err(SceneError::InvalidState { expected, found: self.state });
        }

        Ok(())
    }
}
