//! Nobles and the pool of nobles still on offer.

use std::fmt;
use std::hash::{Hash, Hasher};

use engine_core::{GameRng, Marker, UndoLog};
use rand::seq::SliceRandom;

use crate::catalog;
use crate::gems::GemSet;

/// Catalog identity of a noble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NobleId(pub u8);

/// A noble visits a player whose card gems cover its cost. Gold never counts.
#[derive(Debug, Clone, Copy)]
pub struct Noble {
    id: NobleId,
    points: u8,
    cost: GemSet,
}

impl Noble {
    pub const fn new(id: NobleId, points: u8, cost: GemSet) -> Self {
        Self { id, points, cost }
    }

    pub fn id(&self) -> NobleId {
        self.id
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn cost(&self) -> GemSet {
        self.cost
    }

    pub fn satisfied_by(&self, gems: &GemSet) -> bool {
        self.cost.dominated_by(gems)
    }
}

impl PartialEq for Noble {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Noble {}

impl Hash for Noble {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Noble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "noble worth {} wanting {}", self.points, self.cost)
    }
}

#[derive(Debug, Clone, Copy)]
enum NobleOp {
    Take { noble: Noble, slot: usize },
}

/// Nobles still available this game.
#[derive(Debug, Clone)]
pub struct NoblePool {
    nobles: Vec<Noble>,
    log: UndoLog<NobleOp>,
}

impl NoblePool {
    pub fn new(nobles: Vec<Noble>) -> Self {
        Self {
            nobles,
            log: UndoLog::new(),
        }
    }

    /// Shuffle the catalog and keep `num_players + 1` nobles.
    pub fn deal(num_players: usize, rng: &mut GameRng) -> Self {
        let mut all = catalog::nobles().to_vec();
        all.shuffle(rng);
        all.truncate(num_players + 1);
        Self::new(all)
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn len(&self) -> usize {
        self.nobles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nobles.is_empty()
    }

    pub fn contains(&self, noble: &Noble) -> bool {
        self.nobles.contains(noble)
    }

    /// Nobles whose cost is covered by `gems`.
    pub fn satisfied(&self, gems: &GemSet) -> Vec<Noble> {
        self.nobles
            .iter()
            .copied()
            .filter(|n| n.satisfied_by(gems))
            .collect()
    }

    /// Remove `noble` from the pool. Returns `false` if it was not here.
    pub fn take(&mut self, noble: &Noble) -> bool {
        match self.nobles.iter().position(|n| n == noble) {
            Some(slot) => {
                let noble = self.nobles.remove(slot);
                self.log.record(NobleOp::Take { noble, slot });
                true
            }
            None => false,
        }
    }

    pub fn mark(&mut self) -> Marker {
        self.log.mark()
    }

    /// Roll back to `marker`. Returns `false` if it is no longer on the stack.
    pub fn undo(&mut self, marker: Marker) -> bool {
        let Some(unwind) = self.log.unwind(marker) else {
            return false;
        };
        for op in unwind {
            match op {
                NobleOp::Take { noble, slot } => self.nobles.insert(slot, noble),
            }
        }
        true
    }

    /// Same nobles, no undo history.
    pub fn fork(&self) -> Self {
        Self::new(self.nobles.clone())
    }
}
