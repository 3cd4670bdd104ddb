// Input system - owns every buffer, callback list and gamepad binding

use super::adapters::{keyboard, pointer, JoystickPair, PointerBuffers, VirtualJoystickFactory};
use super::axes::{MergedAxisSnapshot, PlayerAxes, RawAxisBuffers};
use super::callbacks::{CallbackRegistry, EdgeKind};
use super::config::InputOptions;
use super::gamepad::connection::clear_slot;
use super::gamepad::{ConnectionManager, GamepadDevice, GamepadFamily, PadSignal};
use super::key::{
    CompositeKey, DeviceClass, GamepadButton, GamepadDirection, PlayerSlot, TriggerSide,
    UserInputAxis,
};
use super::keymap::KeymapStore;
use super::resolver;
use glam::Vec2;

/// Main input system coordinating every device for every player.
///
/// Platform events may arrive at any time between frames; they only touch
/// raw buffers and the keymap. The published snapshot changes exclusively
/// inside [`InputSystem::update`], which the host calls once per tick.
pub struct InputSystem {
    /// Whether user input is enabled
    enabled: bool,

    /// Options of the current session
    options: InputOptions,

    /// Button/trigger levels plus their callbacks
    keymap: KeymapStore,

    /// Per-source analog values waiting for the resolver
    raw: RawAxisBuffers,

    /// Wheel and client position
    pointer: PointerBuffers,

    /// On-screen sticks, present only while enabled with joysticks on
    joysticks: JoystickPair,

    /// Creates joystick widgets on enable
    joystick_factory: Option<Box<dyn VirtualJoystickFactory>>,

    /// Gamepad slot bindings; lives as long as the system
    connections: ConnectionManager,

    /// Per-frame resolver scratch space
    scratch: [PlayerAxes; 4],

    /// Last published snapshot
    snapshot: MergedAxisSnapshot,

    /// Number of ticks driven since the last enable
    frame_count: u64,
}

impl InputSystem {
    /// Create a disabled input system
    pub fn new() -> Self {
        Self {
            enabled: false,
            options: InputOptions::default(),
            keymap: KeymapStore::new(),
            raw: RawAxisBuffers::new(),
            pointer: PointerBuffers::default(),
            joysticks: JoystickPair::default(),
            joystick_factory: None,
            connections: ConnectionManager::new(),
            scratch: [PlayerAxes::default(); 4],
            snapshot: MergedAxisSnapshot::default(),
            frame_count: 0,
        }
    }

    /// Install the factory used to create virtual joysticks on enable
    pub fn with_joystick_factory(mut self, factory: Box<dyn VirtualJoystickFactory>) -> Self {
        self.joystick_factory = Some(factory);
        self
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Start (or restart) a session with a clean slate.
    /// Calling it twice in a row has the same effect as calling it once.
    pub fn enable_user_input(&mut self, options: InputOptions) {
        if self.enabled {
            log::debug!("User input already enabled, resetting session");
        }
        self.reset_session();
        self.options = options.sanitized();

        if self.options.enable_virtual_joystick {
            let with_right = !self.options.disable_right_stick;
            match self.joystick_factory.as_deref_mut() {
                Some(factory) => self.joysticks = JoystickPair::create(factory, with_right),
                None => log::warn!(
                    "Virtual joysticks requested but no joystick factory is installed"
                ),
            }
        }

        self.enabled = true;
        log::info!(
            "User input enabled (virtual joystick: {}, right stick: {})",
            self.options.enable_virtual_joystick,
            !self.options.disable_right_stick
        );
    }

    /// Stop the session: every event entry point becomes a no-op, every
    /// buffer and callback list is cleared and the joysticks are released.
    /// Gamepad bindings are dropped but the connection manager keeps
    /// accepting connect signals.
    pub fn disable_user_input(&mut self) {
        if self.enabled {
            log::info!("User input disabled");
        } else {
            log::debug!("User input already disabled");
        }
        self.reset_session();
        self.connections.clear();
        self.enabled = false;
    }

    /// Whether a session is running
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Options of the current session (host hints included)
    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    fn reset_session(&mut self) {
        self.joysticks.release();
        self.keymap.clear();
        self.raw.clear();
        self.pointer.clear();
        self.scratch = [PlayerAxes::default(); 4];
        self.snapshot = MergedAxisSnapshot::default();
        self.frame_count = 0;
    }

    // ---------------------------------------------------------------------
    // Platform event entry points
    // ---------------------------------------------------------------------

    /// Key pressed. OS auto-repeat may call this again while held.
    ///
    /// Returns whether the host should skip its own default handling of the
    /// event, which is the case while enabled with `prevent_default` set.
    pub fn key_down(&mut self, code: u32) -> bool {
        self.key_changed(code, true)
    }

    /// Key released; see [`InputSystem::key_down`] for the return value
    pub fn key_up(&mut self, code: u32) -> bool {
        self.key_changed(code, false)
    }

    fn key_changed(&mut self, code: u32, pressed: bool) -> bool {
        if !self.enabled {
            return false;
        }
        keyboard::key_changed(
            &mut self.keymap,
            &mut self.raw,
            &self.options.key_axes,
            code,
            pressed,
        );
        self.options.prevent_default
    }

    /// Pointer button pressed
    pub fn pointer_down(&mut self, button: u32) {
        if self.enabled {
            pointer::button_changed(&mut self.keymap, button, true);
        }
    }

    /// Pointer button released
    pub fn pointer_up(&mut self, button: u32) {
        if self.enabled {
            pointer::button_changed(&mut self.keymap, button, false);
        }
    }

    /// Pointer moved to `client`, having travelled `movement` since the last event
    pub fn pointer_move(&mut self, client: Vec2, movement: Vec2) {
        if self.enabled {
            pointer::moved(
                &mut self.pointer,
                &mut self.raw,
                &self.options.pointer,
                client,
                movement,
            );
        }
    }

    /// Wheel moved by `delta` lines, positive toward the user
    pub fn pointer_wheel(&mut self, delta: f32) {
        if self.enabled {
            pointer::wheel(&mut self.pointer, delta);
        }
    }

    /// A pad appeared at platform index `index`.
    /// Accepted even while disabled so the manager never misses a pad.
    pub fn gamepad_connected(
        &mut self,
        index: usize,
        pad: Box<dyn GamepadDevice>,
    ) -> Option<PlayerSlot> {
        self.connections.connect(index, pad)
    }

    /// The pad at `index` went away; its slot's buffers and keys are cleared
    pub fn gamepad_disconnected(&mut self, index: usize) -> Option<PlayerSlot> {
        let slot = self.connections.disconnect(index)?;
        clear_slot(slot, &mut self.keymap, &mut self.raw);
        Some(slot)
    }

    /// Raw signal from the pad at `index`
    pub fn gamepad_signal(&mut self, index: usize, signal: PadSignal) {
        if !self.enabled {
            return;
        }
        self.connections.route(
            index,
            signal,
            &mut self.keymap,
            &mut self.raw,
            &self.options.gamepad,
        );
    }

    // ---------------------------------------------------------------------
    // Per-frame driver
    // ---------------------------------------------------------------------

    /// Publish a new snapshot. Call exactly once per tick, after scene
    /// update and before anything reads input for the frame.
    pub fn update(&mut self) {
        if !self.enabled {
            return;
        }

        self.joysticks.sample(&mut self.raw, &self.options.joystick);

        self.scratch = [PlayerAxes::default(); 4];

        let mut next = MergedAxisSnapshot {
            wheel: pointer::frame_wheel(&self.pointer, &self.options.pointer),
            client: self.pointer.client,
            ..Default::default()
        };
        resolver::resolve(&self.raw, &mut self.scratch, &mut next);
        self.snapshot = next;

        self.pointer.wheel = 0.0;
        pointer::clear_motion(&mut self.raw);

        self.frame_count += 1;
        if self.frame_count % 600 == 0 {
            log::debug!("Input frame {}", self.frame_count);
        }
    }

    /// Ticks driven since the last enable
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Last published snapshot
    pub fn snapshot(&self) -> &MergedAxisSnapshot {
        &self.snapshot
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Callback lists only exist for an enabled session
    fn registry(&mut self, what: &str) -> Option<&mut CallbackRegistry> {
        if self.enabled {
            Some(self.keymap.callbacks_mut())
        } else {
            log::warn!("Ignoring {} handler registered while user input is disabled", what);
            None
        }
    }

    /// Called with the key code on every key down edge
    pub fn on_keyboard_down(&mut self, callback: impl FnMut(u32) + 'static) {
        if let Some(registry) = self.registry("keyboard down") {
            registry.add_edge(DeviceClass::Key, PlayerSlot::One, EdgeKind::Down, Box::new(callback));
        }
    }

    /// Called with the key code on every key up edge
    pub fn on_keyboard_up(&mut self, callback: impl FnMut(u32) + 'static) {
        if let Some(registry) = self.registry("keyboard up") {
            registry.add_edge(DeviceClass::Key, PlayerSlot::One, EdgeKind::Up, Box::new(callback));
        }
    }

    /// Called once per down edge of `keycode`
    pub fn on_keyboard_press(&mut self, keycode: u32, callback: impl FnMut() + 'static) {
        if let Some(registry) = self.registry("keyboard press") {
            registry.add_press(DeviceClass::Key, PlayerSlot::One, keycode, Box::new(callback));
        }
    }

    /// Called with the button index on every pointer button down edge
    pub fn on_pointer_down(&mut self, callback: impl FnMut(u32) + 'static) {
        if let Some(registry) = self.registry("pointer down") {
            registry.add_edge(
                DeviceClass::PointerButton,
                PlayerSlot::One,
                EdgeKind::Down,
                Box::new(callback),
            );
        }
    }

    /// Called with the button index on every pointer button up edge
    pub fn on_pointer_up(&mut self, callback: impl FnMut(u32) + 'static) {
        if let Some(registry) = self.registry("pointer up") {
            registry.add_edge(
                DeviceClass::PointerButton,
                PlayerSlot::One,
                EdgeKind::Up,
                Box::new(callback),
            );
        }
    }

    /// Called once per down edge of pointer `button`
    pub fn on_pointer_press(&mut self, button: u32, callback: impl FnMut() + 'static) {
        if let Some(registry) = self.registry("pointer press") {
            registry.add_press(DeviceClass::PointerButton, PlayerSlot::One, button, Box::new(callback));
        }
    }

    /// Called with the normalized button index on every down edge of `player`'s pad
    pub fn on_gamepad_button_down(&mut self, callback: impl FnMut(u32) + 'static, player: PlayerSlot) {
        if let Some(registry) = self.registry("gamepad button down") {
            registry.add_edge(DeviceClass::GamepadButton, player, EdgeKind::Down, Box::new(callback));
        }
    }

    /// Called with the normalized button index on every up edge of `player`'s pad
    pub fn on_gamepad_button_up(&mut self, callback: impl FnMut(u32) + 'static, player: PlayerSlot) {
        if let Some(registry) = self.registry("gamepad button up") {
            registry.add_edge(DeviceClass::GamepadButton, player, EdgeKind::Up, Box::new(callback));
        }
    }

    /// Called once per down edge of `button` on `player`'s pad
    pub fn on_gamepad_button_press(
        &mut self,
        button: impl Into<u32>,
        callback: impl FnMut() + 'static,
        player: PlayerSlot,
    ) {
        let button = button.into();
        if let Some(registry) = self.registry("gamepad button press") {
            registry.add_press(DeviceClass::GamepadButton, player, button, Box::new(callback));
        }
    }

    /// Called on every d-pad down edge of `player`'s pad
    pub fn on_gamepad_direction_down(
        &mut self,
        callback: impl FnMut(GamepadDirection) + 'static,
        player: PlayerSlot,
    ) {
        self.add_direction_edge(EdgeKind::Down, callback, player);
    }

    /// Called on every d-pad up edge of `player`'s pad
    pub fn on_gamepad_direction_up(
        &mut self,
        callback: impl FnMut(GamepadDirection) + 'static,
        player: PlayerSlot,
    ) {
        self.add_direction_edge(EdgeKind::Up, callback, player);
    }

    fn add_direction_edge(
        &mut self,
        kind: EdgeKind,
        mut callback: impl FnMut(GamepadDirection) + 'static,
        player: PlayerSlot,
    ) {
        if let Some(registry) = self.registry("gamepad direction") {
            let wrapped = move |index: u32| {
                if let Some(direction) = GamepadDirection::from_index(index) {
                    callback(direction);
                }
            };
            registry.add_edge(DeviceClass::GamepadDirection, player, kind, Box::new(wrapped));
        }
    }

    /// Called once per down edge of `direction` on `player`'s pad
    pub fn on_gamepad_direction_press(
        &mut self,
        direction: GamepadDirection,
        callback: impl FnMut() + 'static,
        player: PlayerSlot,
    ) {
        if let Some(registry) = self.registry("gamepad direction press") {
            registry.add_press(
                DeviceClass::GamepadDirection,
                player,
                direction as u32,
                Box::new(callback),
            );
        }
    }

    /// Called with the new value whenever the left trigger changes
    pub fn on_gamepad_trigger_left(&mut self, callback: impl FnMut(f32) + 'static, player: PlayerSlot) {
        if let Some(registry) = self.registry("left trigger") {
            registry.add_trigger(TriggerSide::Left, player, Box::new(callback));
        }
    }

    /// Called with the new value whenever the right trigger changes
    pub fn on_gamepad_trigger_right(&mut self, callback: impl FnMut(f32) + 'static, player: PlayerSlot) {
        if let Some(registry) = self.registry("right trigger") {
            registry.add_trigger(TriggerSide::Right, player, Box::new(callback));
        }
    }

    // ---------------------------------------------------------------------
    // Queries (neutral defaults while disabled)
    // ---------------------------------------------------------------------

    /// Resolved axis value for a player as of the last tick
    pub fn user_input(&self, axis: UserInputAxis, player: PlayerSlot) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.snapshot.axis(axis, player)
    }

    /// Whether a key is held
    pub fn keyboard_input(&self, keycode: u32) -> bool {
        self.enabled && self.keymap.button(CompositeKey::key(keycode))
    }

    /// Whether a pointer button is held
    pub fn pointer_input(&self, button: u32) -> bool {
        self.enabled && self.keymap.button(CompositeKey::pointer(button))
    }

    /// Whether a normalized gamepad button is held on `player`'s pad
    pub fn gamepad_button_input(&self, button: impl Into<u32>, player: PlayerSlot) -> bool {
        self.enabled
            && self
                .keymap
                .button(CompositeKey::gamepad_button(button.into(), player))
    }

    /// Whether a d-pad direction is held on `player`'s pad
    pub fn gamepad_direction_input(&self, direction: GamepadDirection, player: PlayerSlot) -> bool {
        self.enabled
            && self
                .keymap
                .button(CompositeKey::gamepad_direction(direction, player))
    }

    /// Trigger value in 0..1 on `player`'s pad
    pub fn gamepad_trigger_input(&self, trigger: TriggerSide, player: PlayerSlot) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.keymap
            .analog(CompositeKey::gamepad_trigger(trigger, player))
    }

    /// Family of the pad bound to `player`
    pub fn gamepad_type(&self, player: PlayerSlot) -> Option<GamepadFamily> {
        if !self.enabled {
            return None;
        }
        self.connections.binding(player).map(|b| b.family)
    }

    /// Platform handle of the pad bound to `player`
    pub fn gamepad(&self, player: PlayerSlot) -> Option<&dyn GamepadDevice> {
        if !self.enabled {
            return None;
        }
        self.connections.binding(player).map(|b| b.pad())
    }

    /// Gamepad slot bindings
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSystem")
            .field("enabled", &self.enabled)
            .field("frame_count", &self.frame_count)
            .field("joysticks", &self.joysticks)
            .field("connections", &self.connections)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
