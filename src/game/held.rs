use super::direction::Direction;
use crate::consts;
use crossterm::event::KeyEventKind;
use enum_map::EnumMap;
use std::time::Instant;

/// Which direction keys are currently held down.
///
/// If the terminal reports key releases, a key is held from its press until
/// its release.  Otherwise, the best we can do is watch for auto-repeat: a
/// key counts as held once a second event for it arrives within
/// `HELD_KEY_TIMEOUT` of the previous one, and stays held for as long as they
/// keep coming.  A lone tap is never held.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct HeldKeys {
    release_events: bool,
    last_seen: EnumMap<Direction, Option<KeySeen>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct KeySeen {
    at: Instant,
    repeating: bool,
}

impl HeldKeys {
    pub(super) fn new(release_events: bool) -> HeldKeys {
        HeldKeys {
            release_events,
            last_seen: EnumMap::default(),
        }
    }

    /// Record a key event for the key bound to `direction`
    pub(super) fn record(&mut self, direction: Direction, kind: KeyEventKind, now: Instant) {
        let recent = self.last_seen[direction].is_some_and(|seen| within_timeout(seen.at, now));
        self.last_seen[direction] = match kind {
            KeyEventKind::Press if self.release_events => Some(KeySeen {
                at: now,
                repeating: true,
            }),
            // Terminals without enhanced key reporting deliver auto-repeats
            // as plain presses.
            KeyEventKind::Press => Some(KeySeen {
                at: now,
                repeating: recent,
            }),
            KeyEventKind::Repeat => Some(KeySeen {
                at: now,
                repeating: true,
            }),
            KeyEventKind::Release => None,
        };
    }

    pub(super) fn is_held(&self, direction: Direction, now: Instant) -> bool {
        self.last_seen[direction].is_some_and(|seen| {
            self.release_events || (seen.repeating && within_timeout(seen.at, now))
        })
    }
}

fn within_timeout(then: Instant, now: Instant) -> bool {
    now.saturating_duration_since(then) <= consts::HELD_KEY_TIMEOUT
}
