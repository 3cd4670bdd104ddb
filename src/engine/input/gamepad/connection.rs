// Gamepad connection manager: slot binding and signal routing

use super::family::{adapter_for, PadAdapter, PadContext};
use super::{classify, GamepadDevice, GamepadFamily, PadSignal};
use crate::engine::input::axes::{RawAxisBuffers, SourceClass};
use crate::engine::input::config::GamepadOptions;
use crate::engine::input::key::PlayerSlot;
use crate::engine::input::keymap::KeymapStore;

/// A connected pad bound to one player slot
pub struct GamepadBinding {
    pub slot: PlayerSlot,
    pub family: GamepadFamily,
    /// Platform index the pad was reported with
    pub pad_index: usize,
    pad: Box<dyn GamepadDevice>,
    adapter: Box<dyn PadAdapter>,
}

impl GamepadBinding {
    /// The platform handle (read-only)
    pub fn pad(&self) -> &dyn GamepadDevice {
        self.pad.as_ref()
    }
}

impl std::fmt::Debug for GamepadBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadBinding")
            .field("slot", &self.slot)
            .field("family", &self.family)
            .field("pad_index", &self.pad_index)
            .field("name", &self.pad.name())
            .finish()
    }
}

/// Owns the slot bindings for the process lifetime.
///
/// Each slot is either unbound or bound to exactly one pad. Disconnecting
/// frees the slot for the next connect.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    bindings: [Option<GamepadBinding>; 4],
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a newly connected pad.
    ///
    /// Slot `index + 1` is preferred; if it is taken the first free slot is
    /// used instead. Returns the slot, or `None` when every slot is taken or
    /// the pad index is already bound.
    pub fn connect(&mut self, index: usize, pad: Box<dyn GamepadDevice>) -> Option<PlayerSlot> {
        if let Some(slot) = self.slot_for_pad(index) {
            log::debug!("Gamepad {} already bound to player {}", index, slot.number());
            return None;
        }

        let preferred = PlayerSlot::from_index(index).filter(|slot| self.is_free(*slot));
        let Some(slot) = preferred.or_else(|| self.first_free()) else {
            log::warn!(
                "Gamepad {} ({}) connected but no free player slots",
                index,
                pad.name()
            );
            return None;
        };

        let family = classify(pad.as_ref());
        log::debug!(
            "Gamepad {} reports vendor {:04x?} product {:04x?}",
            index,
            pad.vendor_id(),
            pad.product_id()
        );
        let adapter = adapter_for(family);
        if !adapter.has_dpad() || !adapter.has_triggers() {
            log::warn!(
                "Gamepad {} ({}) uses the {:?} layout: d-pad and trigger handlers are not wired",
                index,
                pad.name(),
                family
            );
        }

        log::info!(
            "Gamepad {} ({}) connected as player {} [{:?}]",
            index,
            pad.name(),
            slot.number(),
            family
        );

        self.bindings[slot.index()] = Some(GamepadBinding {
            slot,
            family,
            pad_index: index,
            pad,
            adapter,
        });
        Some(slot)
    }

    /// Unbind the pad reported at `index`, returning the slot it held
    pub fn disconnect(&mut self, index: usize) -> Option<PlayerSlot> {
        let slot = self.slot_for_pad(index)?;
        if let Some(binding) = self.bindings[slot.index()].take() {
            log::info!(
                "Gamepad {} ({}) on player {} disconnected",
                index,
                binding.pad.name(),
                slot.number()
            );
        }
        Some(slot)
    }

    /// Route a raw signal to the adapter of the slot the pad is bound to.
    /// Signals from unbound pads are dropped.
    pub fn route(
        &self,
        index: usize,
        signal: PadSignal,
        keymap: &mut KeymapStore,
        raw: &mut RawAxisBuffers,
        options: &GamepadOptions,
    ) -> bool {
        let Some(binding) = self.bindings.iter().flatten().find(|b| b.pad_index == index) else {
            log::debug!("Dropping {:?} from unbound gamepad {}", signal, index);
            return false;
        };

        let mut ctx = PadContext {
            slot: binding.slot,
            keymap,
            raw,
            options,
        };
        binding.adapter.handle(&mut ctx, signal);
        true
    }

    pub fn binding(&self, slot: PlayerSlot) -> Option<&GamepadBinding> {
        self.bindings[slot.index()].as_ref()
    }

    pub fn is_free(&self, slot: PlayerSlot) -> bool {
        self.bindings[slot.index()].is_none()
    }

    /// Slot holding the pad reported at `index`
    pub fn slot_for_pad(&self, index: usize) -> Option<PlayerSlot> {
        self.bindings
            .iter()
            .flatten()
            .find(|b| b.pad_index == index)
            .map(|b| b.slot)
    }

    fn first_free(&self) -> Option<PlayerSlot> {
        PlayerSlot::ALL.into_iter().find(|slot| self.is_free(*slot))
    }

    /// Number of bound slots
    pub fn bound_count(&self) -> usize {
        self.bindings.iter().flatten().count()
    }

    /// Drop every binding; the manager itself stays usable
    pub fn clear(&mut self) {
        for binding in &mut self.bindings {
            *binding = None;
        }
    }
}

/// Forget everything a slot's pad wrote. Held buttons and directions are
/// released and triggers drop to zero through the keymap, so up and trigger
/// listeners see the pad let go.
pub fn clear_slot(slot: PlayerSlot, keymap: &mut KeymapStore, raw: &mut RawAxisBuffers) {
    raw.clear_source(SourceClass::Gamepad, slot);
    keymap.release_gamepad(slot);
}
