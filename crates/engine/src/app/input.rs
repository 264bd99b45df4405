use super::geometry::Position;

/// Pointer and keyboard state shared by every action during a tick.
///
/// Press events are single-shot: the first action that takes one clears it.
/// An event nobody reads stays pending across ticks until something does.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pointer: Position,
    pointer_press: Option<Position>,
    key_press: Option<char>,
}

impl FrameInput {
    pub fn pointer(&self) -> Position {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Position) {
        self.pointer = position;
    }

    pub fn push_pointer_press(&mut self, position: Position) {
        self.pointer_press = Some(position);
    }

    /// Key presses are normalized to uppercase ASCII.
    pub fn push_key_press(&mut self, key: char) {
        self.key_press = Some(key.to_ascii_uppercase());
    }

    pub fn has_pointer_press(&self) -> bool {
        self.pointer_press.is_some()
    }

    pub fn take_pointer_press(&mut self) -> Option<Position> {
        self.pointer_press.take()
    }

    pub fn take_key_press(&mut self) -> Option<char> {
        self.key_press.take()
    }

    pub fn with_pointer_press(mut self, position: Position) -> Self {
        self.push_pointer_press(position);
        self
    }

    pub fn with_key_press(mut self, key: char) -> Self {
        self.push_key_press(key);
        self
    }
}
