// Gamepad classification, family adapters and slot management
//
// The platform reports pads as opaque `GamepadDevice` handles plus a stream
// of raw `PadSignal`s in the vendor's own button numbering. `classify`
// picks a `GamepadFamily`, the matching `PadAdapter` normalizes that
// family's signals, and `ConnectionManager` keeps each pad bound to one
// player slot.

pub mod connection;
pub mod dualshock;
pub mod family;
pub mod generic;
pub mod gilrs_backend;
pub mod xbox;

pub use connection::{ConnectionManager, GamepadBinding};
pub use family::{adapter_for, normalize_stick, PadAdapter, PadContext};
pub use gilrs_backend::GilrsBackend;

use glam::Vec2;

/// USB vendor id for Microsoft controllers
pub const VENDOR_MICROSOFT: u16 = 0x045e;

/// USB vendor id for Sony controllers
pub const VENDOR_SONY: u16 = 0x054c;

/// Button/axis layout a pad is driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadFamily {
    Xbox360,
    DualShock,
    /// Anything unrecognized; buttons and sticks only
    Generic,
}

/// Opaque, read-only handle to a platform gamepad
pub trait GamepadDevice {
    /// Human-readable name reported by the platform
    fn name(&self) -> &str;

    /// USB vendor id, if the platform exposes one
    fn vendor_id(&self) -> Option<u16> {
        None
    }

    /// USB product id, if the platform exposes one
    fn product_id(&self) -> Option<u16> {
        None
    }
}

/// Raw per-pad signal, in the pad family's native numbering.
///
/// Stick values use screen-space Y (down is positive) and triggers are 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadSignal {
    ButtonDown(u32),
    ButtonUp(u32),
    LeftStick(Vec2),
    RightStick(Vec2),
    DPadDown(u32),
    DPadUp(u32),
    LeftTrigger(f32),
    RightTrigger(f32),
}

/// Pick a family from what the pad reports about itself.
/// A known vendor id wins; otherwise the reported name decides.
pub fn classify(pad: &dyn GamepadDevice) -> GamepadFamily {
    match pad.vendor_id() {
        Some(VENDOR_MICROSOFT) => return GamepadFamily::Xbox360,
        Some(VENDOR_SONY) => return GamepadFamily::DualShock,
        _ => {}
    }

    let name = pad.name().to_ascii_lowercase();
    let xbox = ["xbox", "x-box", "xinput", "360"];
    let dualshock = ["dualshock", "playstation", "ps3", "ps4", "sony", "wireless controller"];

    if xbox.iter().any(|hint| name.contains(hint)) {
        GamepadFamily::Xbox360
    } else if dualshock.iter().any(|hint| name.contains(hint)) {
        GamepadFamily::DualShock
    } else {
        GamepadFamily::Generic
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal pad handle for tests
    #[derive(Debug, Clone)]
    pub(crate) struct FakePad {
        pub name: String,
        pub vendor: Option<u16>,
    }

    impl FakePad {
        pub(crate) fn new(name: &str, vendor: Option<u16>) -> Self {
            Self {
                name: name.to_string(),
                vendor,
            }
        }

        pub(crate) fn boxed(name: &str, vendor: Option<u16>) -> Box<dyn GamepadDevice> {
            Box::new(Self::new(name, vendor))
        }
    }

    impl GamepadDevice for FakePad {
        fn name(&self) -> &str {
            &self.name
        }

        fn vendor_id(&self) -> Option<u16> {
            self.vendor
        }
    }

    #[test]
    fn test_classify_by_vendor() {
        assert_eq!(
            classify(&FakePad::new("Controller", Some(VENDOR_MICROSOFT))),
            GamepadFamily::Xbox360
        );
        assert_eq!(
            classify(&FakePad::new("Controller", Some(VENDOR_SONY))),
            GamepadFamily::DualShock
        );
    }

    #[test]
    fn test_vendor_beats_name() {
        let pad = FakePad::new("Xbox-style pad", Some(VENDOR_SONY));
        assert_eq!(classify(&pad), GamepadFamily::DualShock);
    }

    #[test]
    fn test_classify_by_name() {
        assert_eq!(
            classify(&FakePad::new("Xbox 360 Controller", None)),
            GamepadFamily::Xbox360
        );
        assert_eq!(
            classify(&FakePad::new("Sony PLAYSTATION(R)3 Controller", None)),
            GamepadFamily::DualShock
        );
        assert_eq!(
            classify(&FakePad::new("Wireless Controller", None)),
            GamepadFamily::DualShock
        );
    }

    #[test]
    fn test_unknown_pad_is_generic() {
        assert_eq!(
            classify(&FakePad::new("8BitDo SN30", Some(0x2dc8))),
            GamepadFamily::Generic
        );
        assert_eq!(classify(&FakePad::new("", None)), GamepadFamily::Generic);
    }
}
