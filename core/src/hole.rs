use serde::{Deserialize, Serialize};

/// Which kind of mole popped up, decides the sign of the score change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoleVariant {
    /// Bald mole, worth a point.
    Friendly,
    /// Mole with hair, costs a point.
    Hostile,
}

impl MoleVariant {
    pub const fn score_delta(self) -> i32 {
        match self {
            Self::Friendly => 1,
            Self::Hostile => -1,
        }
    }

    pub const fn has_hair(self) -> bool {
        matches!(self, Self::Hostile)
    }

    pub const fn cue(self) -> Cue {
        match self {
            Self::Friendly => Cue::Clap,
            Self::Hostile => Cue::Scream,
        }
    }
}

impl Default for MoleVariant {
    fn default() -> Self {
        Self::Friendly
    }
}

/// Sound played when a mole gets whacked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Clap,
    Scream,
}

impl Cue {
    pub const ALL: [Cue; 2] = [Cue::Clap, Cue::Scream];
}

/// Canonical state of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub visible: bool,
    pub variant: MoleVariant,
    /// Already whacked this appearance, waiting for the hide delay.
    pub hit: bool,
}

impl Hole {
    pub const EMPTY: Hole = Hole {
        visible: false,
        variant: MoleVariant::Friendly,
        hit: false,
    };

    pub const fn with_mole(variant: MoleVariant) -> Self {
        Self {
            visible: true,
            variant,
            hit: false,
        }
    }

    pub const fn is_empty(&self) -> bool {
        !self.visible
    }

    pub const fn is_whackable(&self) -> bool {
        self.visible && !self.hit
    }
}
