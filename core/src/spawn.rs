use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a spawn tick picks the hole for the next mole.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Pick uniformly among empty holes, moles already up stay where they are.
    FillEmpty,
    /// Clear the whole grid, then put a single mole in any hole.
    ResetGrid,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::FillEmpty
    }
}

/// Placement decided by a spawn tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub index: HoleIndex,
    pub variant: MoleVariant,
    /// Every other hole has to be emptied before placing.
    pub clear_grid: bool,
}

impl SpawnPolicy {
    /// Picks a hole and a variant, or `None` when no hole is eligible.
    pub fn choose<R: Rng + ?Sized>(self, holes: &[Hole], rng: &mut R) -> Option<Spawn> {
        let (index, clear_grid) = match self {
            Self::FillEmpty => {
                let empty_holes = holes.iter().filter(|hole| hole.is_empty()).count();
                if empty_holes == 0 {
                    return None;
                }
                let pick = rng.random_range(0..empty_holes);
                let index = holes
                    .iter()
                    .enumerate()
                    .filter(|(_, hole)| hole.is_empty())
                    .map(|(index, _)| index)
                    .nth(pick)?;
                (index, false)
            }
            Self::ResetGrid => {
                if holes.is_empty() {
                    return None;
                }
                (rng.random_range(0..holes.len()), true)
            }
        };

        let variant = if rng.random_bool(0.5) {
            MoleVariant::Hostile
        } else {
            MoleVariant::Friendly
        };

        Some(Spawn {
            index,
            variant,
            clear_grid,
        })
    }
}
