// Raw per-source axis buffers and the published snapshot

use super::key::{AxisName, PlayerSlot, UserInputAxis};
use glam::Vec2;

/// Sources that feed the precedence resolver, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceClass {
    VirtualJoystick,
    /// Keyboard keys and pointer motion
    Keyboard,
    Gamepad,
}

impl SourceClass {
    /// Resolver order for player one
    pub const PRECEDENCE: [SourceClass; 3] = [Self::VirtualJoystick, Self::Keyboard, Self::Gamepad];

    fn index(self) -> usize {
        match self {
            Self::VirtualJoystick => 0,
            Self::Keyboard => 1,
            Self::Gamepad => 2,
        }
    }
}

type AxisRow = [f32; 4];

/// One float per (source, axis, player)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAxisBuffers {
    values: [[AxisRow; 4]; 3],
}

impl RawAxisBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: SourceClass, axis: AxisName, player: PlayerSlot) -> f32 {
        self.values[source.index()][player.index()][axis.index()]
    }

    pub fn set(&mut self, source: SourceClass, axis: AxisName, player: PlayerSlot, value: f32) {
        self.values[source.index()][player.index()][axis.index()] = value;
    }

    /// Accumulate into an axis (used for per-frame pointer motion)
    pub fn add(&mut self, source: SourceClass, axis: AxisName, player: PlayerSlot, delta: f32) {
        self.values[source.index()][player.index()][axis.index()] += delta;
    }

    /// Write a stick pair into horizontal/vertical or mouseX/mouseY
    pub fn set_pair(
        &mut self,
        source: SourceClass,
        (x_axis, y_axis): (AxisName, AxisName),
        player: PlayerSlot,
        value: Vec2,
    ) {
        self.set(source, x_axis, player, value.x);
        self.set(source, y_axis, player, value.y);
    }

    /// Zero every axis of one source for one player
    pub fn clear_source(&mut self, source: SourceClass, player: PlayerSlot) {
        self.values[source.index()][player.index()] = [0.0; 4];
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Axis pair written by a left stick
pub const MOVE_AXES: (AxisName, AxisName) = (AxisName::Horizontal, AxisName::Vertical);

/// Axis pair written by a right stick or pointer motion
pub const LOOK_AXES: (AxisName, AxisName) = (AxisName::MouseX, AxisName::MouseY);

/// Resolved axes for one player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAxes {
    pub horizontal: f32,
    pub vertical: f32,
    pub mouse_x: f32,
    pub mouse_y: f32,
}

impl PlayerAxes {
    pub fn get(&self, axis: AxisName) -> f32 {
        match axis {
            AxisName::Horizontal => self.horizontal,
            AxisName::Vertical => self.vertical,
            AxisName::MouseX => self.mouse_x,
            AxisName::MouseY => self.mouse_y,
        }
    }

    pub fn set(&mut self, axis: AxisName, value: f32) {
        match axis {
            AxisName::Horizontal => self.horizontal = value,
            AxisName::Vertical => self.vertical = value,
            AxisName::MouseX => self.mouse_x = value,
            AxisName::MouseY => self.mouse_y = value,
        }
    }
}

/// Read-only result published once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergedAxisSnapshot {
    pub players: [PlayerAxes; 4],
    /// Player one only
    pub wheel: f32,
    /// Player one only, last known pointer position
    pub client: Vec2,
}

impl MergedAxisSnapshot {
    pub fn player(&self, player: PlayerSlot) -> &PlayerAxes {
        &self.players[player.index()]
    }

    /// Value of any public axis; wheel and client coordinates only exist for player one
    pub fn axis(&self, axis: UserInputAxis, player: PlayerSlot) -> f32 {
        let axes = self.player(player);
        match axis {
            UserInputAxis::Horizontal => axes.horizontal,
            UserInputAxis::Vertical => axes.vertical,
            UserInputAxis::MouseX => axes.mouse_x,
            UserInputAxis::MouseY => axes.mouse_y,
            UserInputAxis::Wheel if player == PlayerSlot::One => self.wheel,
            UserInputAxis::ClientX if player == PlayerSlot::One => self.client.x,
            UserInputAxis::ClientY if player == PlayerSlot::One => self.client.y,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_start_zeroed() {
        let buffers = RawAxisBuffers::new();
        for source in SourceClass::PRECEDENCE {
            for player in PlayerSlot::ALL {
                for axis in AxisName::ALL {
                    assert_eq!(buffers.get(source, axis, player), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_buffers_are_independent_per_source() {
        let mut buffers = RawAxisBuffers::new();
        buffers.set(SourceClass::Keyboard, AxisName::Horizontal, PlayerSlot::One, 1.0);
        assert_eq!(
            buffers.get(SourceClass::Gamepad, AxisName::Horizontal, PlayerSlot::One),
            0.0
        );
        assert_eq!(
            buffers.get(SourceClass::Keyboard, AxisName::Horizontal, PlayerSlot::Two),
            0.0
        );
    }

    #[test]
    fn test_set_pair_and_clear_source() {
        let mut buffers = RawAxisBuffers::new();
        buffers.set_pair(SourceClass::Gamepad, LOOK_AXES, PlayerSlot::Three, Vec2::new(0.4, -0.2));
        assert_eq!(buffers.get(SourceClass::Gamepad, AxisName::MouseX, PlayerSlot::Three), 0.4);
        assert_eq!(buffers.get(SourceClass::Gamepad, AxisName::MouseY, PlayerSlot::Three), -0.2);

        buffers.clear_source(SourceClass::Gamepad, PlayerSlot::Three);
        assert_eq!(buffers, RawAxisBuffers::new());
    }

    #[test]
    fn test_add_accumulates() {
        let mut buffers = RawAxisBuffers::new();
        buffers.add(SourceClass::Keyboard, AxisName::MouseX, PlayerSlot::One, 2.0);
        buffers.add(SourceClass::Keyboard, AxisName::MouseX, PlayerSlot::One, 3.0);
        assert_eq!(buffers.get(SourceClass::Keyboard, AxisName::MouseX, PlayerSlot::One), 5.0);
    }

    #[test]
    fn test_snapshot_wheel_and_client_are_player_one_only() {
        let snapshot = MergedAxisSnapshot {
            wheel: 3.0,
            client: Vec2::new(10.0, 20.0),
            ..Default::default()
        };
        assert_eq!(snapshot.axis(UserInputAxis::Wheel, PlayerSlot::One), 3.0);
        assert_eq!(snapshot.axis(UserInputAxis::ClientY, PlayerSlot::One), 20.0);
        assert_eq!(snapshot.axis(UserInputAxis::Wheel, PlayerSlot::Two), 0.0);
        assert_eq!(snapshot.axis(UserInputAxis::ClientX, PlayerSlot::Four), 0.0);
    }
}
