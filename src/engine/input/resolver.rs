// Axis precedence resolver

use super::axes::{MergedAxisSnapshot, PlayerAxes, RawAxisBuffers, SourceClass};
use super::key::{AxisName, PlayerSlot};

const PLAYER_ONE_SOURCES: &[SourceClass] = &SourceClass::PRECEDENCE;
const GAMEPAD_ONLY: &[SourceClass] = &[SourceClass::Gamepad];

/// First non-zero value among `sources`, in order; zero if every source is zero.
/// Sources are never summed.
pub fn first_non_zero(
    raw: &RawAxisBuffers,
    sources: &[SourceClass],
    axis: AxisName,
    player: PlayerSlot,
) -> f32 {
    sources
        .iter()
        .map(|&source| raw.get(source, axis, player))
        .find(|value| *value != 0.0)
        .unwrap_or(0.0)
}

/// Sources consulted for a player.
///
/// Keyboard and virtual joysticks only ever feed player one; players two to
/// four see their own gamepad and nothing else.
pub fn sources_for(player: PlayerSlot) -> &'static [SourceClass] {
    match player {
        PlayerSlot::One => PLAYER_ONE_SOURCES,
        _ => GAMEPAD_ONLY,
    }
}

/// Resolve one player's axes into `scratch`
pub fn resolve_player(raw: &RawAxisBuffers, player: PlayerSlot, scratch: &mut PlayerAxes) {
    let sources = sources_for(player);
    for axis in AxisName::ALL {
        scratch.set(axis, first_non_zero(raw, sources, axis, player));
    }
}

/// Resolve all four players into the snapshot.
///
/// Every player is computed into scratch storage first and the snapshot is
/// written in one assignment per player, so it is never half updated.
pub fn resolve(
    raw: &RawAxisBuffers,
    scratch: &mut [PlayerAxes; 4],
    snapshot: &mut MergedAxisSnapshot,
) {
    for player in PlayerSlot::ALL {
        resolve_player(raw, player, &mut scratch[player.index()]);
    }
    snapshot.players = *scratch;
}
