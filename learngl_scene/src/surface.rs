use std::collections::HashSet;

/// Keys the demos care about. Everything else is kept by scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other(u32)
}

/// Something that happened to the window since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The drawable area changed size, in physical pixels.
    Resized { width: u32, height: u32 },
    /// The user asked to close the window (close button, window manager, ...).
    CloseRequested,
    Key { key: Key, pressed: bool },
}

/// Key state and the close flag, folded from the events seen so far.
#[derive(Debug, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    should_close: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A close request sets the close flag. A key press only updates key state; closing on a key
    /// is up to whoever reads that state.
    pub fn apply(&mut self, event: &SurfaceEvent) {
        match *event {
            SurfaceEvent::CloseRequested => self.should_close = true,
            SurfaceEvent::Key { key, pressed: true } => { self.pressed.insert(key); }
            SurfaceEvent::Key { key, pressed: false } => { self.pressed.remove(&key); }
            SurfaceEvent::Resized { .. } => {}
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn should_close(&self) -> bool { self.should_close }

    pub fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }
}

/// A window with a current GL context that the render loop draws into.
pub trait Surface {
    type Error;

    /// Handles everything that's pending without waiting for more. Events are appended to
    /// `events` after they've been applied to the surface's own input state.
    fn poll_events(&mut self, events: &mut Vec<SurfaceEvent>);

    fn is_key_pressed(&self, key: Key) -> bool;

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Swaps the front and back buffers.
    fn present(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod test {
    use super::*;

    fn escape(pressed: bool) -> SurfaceEvent {
        SurfaceEvent::Key { key: Key::Escape, pressed }
    }

    #[test]
    fn close_request_sets_the_flag() {
        let mut input = InputState::new();

        input.apply(&SurfaceEvent::CloseRequested);

        assert!(input.should_close());
    }

    #[test]
    fn escape_is_only_key_state() {
        let mut input = InputState::new();

        input.apply(&escape(true));

        assert!(input.is_pressed(Key::Escape));
        assert!(!input.should_close());
    }

    #[test]
    fn releasing_a_key_clears_it() {
        let mut input = InputState::new();

        input.apply(&escape(true));
        input.apply(&escape(false));

        assert!(!input.is_pressed(Key::Escape));
    }

    #[test]
    fn other_events_leave_the_flag_alone() {
        let mut input = InputState::new();

        input.apply(&SurfaceEvent::Resized { width: 10, height: 10 });
        input.apply(&SurfaceEvent::Key { key: Key::Other(57), pressed: true });

        assert!(!input.should_close());
        assert!(!input.is_pressed(Key::Escape));
        assert!(input.is_pressed(Key::Other(57)));
    }
}
