// Callback registry for edge events

use super::key::{DeviceClass, PlayerSlot, TriggerSide};
use std::collections::HashMap;

/// Handler for down/up edges; receives the index of the input that changed
pub type EdgeCallback = Box<dyn FnMut(u32)>;

/// Handler for a press of one specific input
pub type PressCallback = Box<dyn FnMut()>;

/// Handler for analog trigger changes; receives the new 0..1 value
pub type TriggerCallback = Box<dyn FnMut(f32)>;

/// Kind of edge a callback listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Down,
    Up,
}

/// The three ordered handler lists for one (device class, player) pair
#[derive(Default)]
struct CallbackLists {
    down: Vec<EdgeCallback>,
    up: Vec<EdgeCallback>,
    press: Vec<(u32, PressCallback)>,
}

/// Per device class, per player handler lists.
///
/// Lists are append-only during a session and only cleared in bulk.
#[derive(Default)]
pub struct CallbackRegistry {
    lists: HashMap<(DeviceClass, PlayerSlot), CallbackLists>,
    triggers: HashMap<(TriggerSide, PlayerSlot), Vec<TriggerCallback>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a down or up handler
    pub fn add_edge(
        &mut self,
        class: DeviceClass,
        player: PlayerSlot,
        kind: EdgeKind,
        callback: EdgeCallback,
    ) {
        let lists = self.lists.entry((class, player)).or_default();
        match kind {
            EdgeKind::Down => lists.down.push(callback),
            EdgeKind::Up => lists.up.push(callback),
        }
    }

    /// Append a press handler for one input index
    pub fn add_press(
        &mut self,
        class: DeviceClass,
        player: PlayerSlot,
        index: u32,
        callback: PressCallback,
    ) {
        self.lists
            .entry((class, player))
            .or_default()
            .press
            .push((index, callback));
    }

    /// Append a trigger-change handler
    pub fn add_trigger(&mut self, side: TriggerSide, player: PlayerSlot, callback: TriggerCallback) {
        self.triggers.entry((side, player)).or_default().push(callback);
    }

    /// Fire a false->true transition: matching press handlers, then every down handler
    pub(crate) fn fire_down(&mut self, class: DeviceClass, player: PlayerSlot, index: u32) {
        if let Some(lists) = self.lists.get_mut(&(class, player)) {
            for (wanted, callback) in &mut lists.press {
                if *wanted == index {
                    callback();
                }
            }
            for callback in &mut lists.down {
                callback(index);
            }
        }
    }

    /// Fire a true->false transition
    pub(crate) fn fire_up(&mut self, class: DeviceClass, player: PlayerSlot, index: u32) {
        if let Some(lists) = self.lists.get_mut(&(class, player)) {
            for callback in &mut lists.up {
                callback(index);
            }
        }
    }

    pub(crate) fn fire_trigger(&mut self, side: TriggerSide, player: PlayerSlot, value: f32) {
        if let Some(callbacks) = self.triggers.get_mut(&(side, player)) {
            for callback in callbacks {
                callback(value);
            }
        }
    }

    /// Number of handlers registered for a class/player pair (all kinds)
    pub fn len(&self, class: DeviceClass, player: PlayerSlot) -> usize {
        self.lists
            .get(&(class, player))
            .map(|l| l.down.len() + l.up.len() + l.press.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lists
            .values()
            .all(|l| l.down.is_empty() && l.up.is_empty() && l.press.is_empty())
            && self.triggers.values().all(Vec::is_empty)
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.lists.clear();
        self.triggers.clear();
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("lists", &self.lists.len())
            .field("triggers", &self.triggers.len())
            .finish()
    }
}
