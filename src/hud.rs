//! HUD collaborators
//!
//! Presentation-side bookkeeping driven by simulation events. The core never
//! calls into this module.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::sim::{GameEvent, Progress};

/// Collections needed to merge the indicator
pub const MERGE_COUNT: u8 = 3;

const COLLECT_WORDS: &[&str] = &[
    "WOW!", "NICE!", "OMG!", "YEAH!", "YES!", "HA!", "GOTCHA!", "CATCH!", "HIT!", "AWW!", "WHOA!",
    "YAY!", "PRO!", "SKILL!",
];

const MISS_WORDS: &[&str] = &[
    "MISS.", "BAD.", "NOPE.", "ARGH.", "GONE.", "WTF.", "EH.", "NAH.", "OOPS.", "EWW.", "OY.",
    "NOOB.", "WHAT.", "SUCK.",
];

/// What happened to the folder indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyChange {
    /// One more slot filled (1-based count)
    Filled(u8),
    /// All slots filled and merged; the count is back to zero
    Merged,
    /// A miss emptied the filled slots
    Cleared { emptied: u8 },
}

/// Collected-folder indicator: fills per collection, merges every
/// [`MERGE_COUNT`], empties on a miss
#[derive(Debug, Clone, Default)]
pub struct FolderTally {
    pub filled: u8,
    pub merges: u32,
}

impl FolderTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collected(&mut self) -> TallyChange {
        self.filled += 1;
        if self.filled >= MERGE_COUNT {
            self.filled = 0;
            self.merges += 1;
            TallyChange::Merged
        } else {
            TallyChange::Filled(self.filled)
        }
    }

    pub fn missed(&mut self) -> TallyChange {
        let emptied = self.filled;
        self.filled = 0;
        TallyChange::Cleared { emptied }
    }

    /// Feed a simulation event; returns the change it caused, if any
    pub fn apply(&mut self, event: &GameEvent) -> Option<TallyChange> {
        match event {
            GameEvent::PickupCollected { .. } => Some(self.collected()),
            GameEvent::PickupMissed { .. } => Some(self.missed()),
            _ => None,
        }
    }
}

/// Text for the shape status readout, hidden once progress runs out
pub fn status_label(progress: &Progress) -> Option<String> {
    progress.visible.then(|| format!("{}%", progress.display))
}

/// Random exclamation shown over a collected or missed folder
pub fn caption<R: Rng + ?Sized>(collected: bool, rng: &mut R) -> &'static str {
    let words = if collected { COLLECT_WORDS } else { MISS_WORDS };
    words.choose(rng).copied().unwrap_or_default()
}
