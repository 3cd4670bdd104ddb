// Addressing scheme for every digital input and axis

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Logical player slot (1-4)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl PlayerSlot {
    /// All slots in first-fit order
    pub const ALL: [PlayerSlot; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Zero-based index, suitable for indexing per-player arrays
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
            Self::Four => 3,
        }
    }

    /// Human-facing player number (1-4)
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Slot for a zero-based index, if one exists
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Which family of digital inputs a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Key,
    PointerButton,
    GamepadButton,
    GamepadDirection,
    /// Analog trigger value, stored as a scalar rather than a boolean
    GamepadTrigger,
}

/// Unique address of one digital input across all devices and players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub class: DeviceClass,
    pub index: u32,
    pub player: PlayerSlot,
}

impl CompositeKey {
    pub fn new(class: DeviceClass, index: u32, player: PlayerSlot) -> Self {
        Self {
            class,
            index,
            player,
        }
    }

    /// Keyboard key (keyboard is always routed to player one)
    pub fn key(code: u32) -> Self {
        Self::new(DeviceClass::Key, code, PlayerSlot::One)
    }

    /// Pointer button (pointer is always routed to player one)
    pub fn pointer(button: u32) -> Self {
        Self::new(DeviceClass::PointerButton, button, PlayerSlot::One)
    }

    pub fn gamepad_button(button: u32, player: PlayerSlot) -> Self {
        Self::new(DeviceClass::GamepadButton, button, player)
    }

    pub fn gamepad_direction(direction: GamepadDirection, player: PlayerSlot) -> Self {
        Self::new(DeviceClass::GamepadDirection, direction as u32, player)
    }

    pub fn gamepad_trigger(side: TriggerSide, player: PlayerSlot) -> Self {
        Self::new(DeviceClass::GamepadTrigger, side as u32, player)
    }

    /// Whether this key belongs to one of the gamepad classes
    pub fn is_gamepad(&self) -> bool {
        matches!(
            self.class,
            DeviceClass::GamepadButton | DeviceClass::GamepadDirection | DeviceClass::GamepadTrigger
        )
    }
}

/// Axes exposed through the query API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserInputAxis {
    Horizontal,
    Vertical,
    MouseX,
    MouseY,
    /// Player one only
    Wheel,
    /// Player one only, pointer only
    ClientX,
    /// Player one only, pointer only
    ClientY,
}

/// The four axes that go through the precedence resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisName {
    Horizontal = 0,
    Vertical = 1,
    MouseX = 2,
    MouseY = 3,
}

impl AxisName {
    pub const ALL: [AxisName; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::MouseX,
        Self::MouseY,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Normalized gamepad buttons (Xbox-style naming)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    Start = 4,
    Back = 5,
    LeftBumper = 6,
    RightBumper = 7,
    LeftStick = 8,
    RightStick = 9,
}

impl GamepadButton {
    pub fn index(self) -> u32 {
        self as u32
    }
}

impl From<GamepadButton> for u32 {
    fn from(button: GamepadButton) -> Self {
        button.index()
    }
}

/// Directional pad directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadDirection {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl GamepadDirection {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            2 => Some(Self::Left),
            3 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Left or right analog trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSide {
    Left = 0,
    Right = 1,
}

/// Numeric key codes used by the keyboard adapter
pub mod keycodes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const SHIFT: u32 = 16;
    pub const CONTROL: u32 = 17;
    pub const ALT: u32 = 18;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const DIGIT_0: u32 = 48;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
    pub const F1: u32 = 112;

    /// Highest code the keyboard adapter accepts
    pub const MAX: u32 = 255;
}

/// Translate a winit physical key into the numeric code space
pub fn keycode_from_winit(code: KeyCode) -> Option<u32> {
    use KeyCode::*;

    let letters = [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO,
        KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ];
    if let Some(pos) = letters.iter().position(|k| *k == code) {
        return Some(keycodes::A + pos as u32);
    }

    let digits = [
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    ];
    if let Some(pos) = digits.iter().position(|k| *k == code) {
        return Some(keycodes::DIGIT_0 + pos as u32);
    }

    let functions = [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12];
    if let Some(pos) = functions.iter().position(|k| *k == code) {
        return Some(keycodes::F1 + pos as u32);
    }

    let mapped = match code {
        Backspace => keycodes::BACKSPACE,
        Tab => keycodes::TAB,
        Enter | NumpadEnter => keycodes::ENTER,
        ShiftLeft | ShiftRight => keycodes::SHIFT,
        ControlLeft | ControlRight => keycodes::CONTROL,
        AltLeft | AltRight => keycodes::ALT,
        Escape => keycodes::ESCAPE,
        Space => keycodes::SPACE,
        ArrowLeft => keycodes::LEFT,
        ArrowUp => keycodes::UP,
        ArrowRight => keycodes::RIGHT,
        ArrowDown => keycodes::DOWN,
        _ => return None,
    };
    Some(mapped)
}

/// Translate a winit mouse button into a pointer button index
pub fn pointer_button_from_winit(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => 5 + n as u32,
    }
}
