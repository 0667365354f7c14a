use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    Over,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// The round state machine, every mutation goes through one of the transition methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEngine {
    config: RoundConfig,
    holes: Vec<Hole>,
    score: Score,
    time_left: Seconds,
    phase: Phase,
}

impl RoundEngine {
    /// Builds an idle engine, rejecting configs under which a round would start already finished.
    pub fn new(config: RoundConfig) -> Result<Self> {
        Ok(Self::new_unchecked(config.validate()?))
    }

    fn new_unchecked(config: RoundConfig) -> Self {
        Self {
            config,
            holes: vec![Hole::EMPTY; config.hole_count],
            score: 0,
            time_left: config.duration_secs,
            phase: Default::default(),
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_left(&self) -> Seconds {
        self.time_left
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn hole_at(&self, index: HoleIndex) -> Option<Hole> {
        self.holes.get(index).copied()
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        if !self.phase.is_over() {
            return None;
        }

        Some(if self.score >= self.config.win_score {
            Verdict::Won
        } else {
            Verdict::TimeUp
        })
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            holes: self.holes.clone(),
            score: self.score,
            time_left: self.time_left,
            phase: self.phase,
            verdict: self.verdict(),
        }
    }

    /// Resets everything and starts a fresh round, whatever the current phase.
    pub fn start(&mut self) {
        self.score = 0;
        self.time_left = self.config.duration_secs;
        self.holes.fill(Hole::EMPTY);
        self.phase = Phase::Playing;
        log::debug!("round started, {}s on the clock", self.time_left);
    }

    pub fn countdown_tick(&mut self) -> TickOutcome {
        if !self.is_playing() {
            log::trace!("countdown tick outside of a round ignored");
            return TickOutcome::NoChange;
        }

        self.time_left = self.time_left.saturating_sub(1);
        log::trace!("countdown: {}s left", self.time_left);

        if self.check_round_over() {
            TickOutcome::RoundOver
        } else {
            TickOutcome::Ticked
        }
    }

    pub fn spawn_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpawnOutcome {
        if !self.is_playing() {
            log::trace!("spawn tick outside of a round ignored");
            return SpawnOutcome::NoChange;
        }

        match self.config.spawn_policy.choose(&self.holes, rng) {
            Some(spawn) => {
                self.place_mole(spawn);
                SpawnOutcome::Spawned(spawn)
            }
            None => {
                log::trace!("no hole available for a new mole");
                SpawnOutcome::NoChange
            }
        }
    }

    /// Puts a mole into a hole, out of range placements and placements outside a round are dropped.
    pub(crate) fn place_mole(&mut self, spawn: Spawn) {
        if !self.is_playing() {
            log::trace!("spawn outside of a round ignored");
            return;
        }
        if spawn.index >= self.holes.len() {
            log::trace!("spawn at out of range hole {} ignored", spawn.index);
            return;
        }

        if spawn.clear_grid {
            self.holes.fill(Hole::EMPTY);
        }
        self.holes[spawn.index] = Hole::with_mole(spawn.variant);
        log::trace!("{:?} mole up at hole {}", spawn.variant, spawn.index);
    }

    pub fn click_hole(&mut self, index: HoleIndex) -> ClickOutcome {
        if !self.is_playing() {
            log::trace!("click on hole {} outside of a round ignored", index);
            return ClickOutcome::NoChange;
        }

        let Some(hole) = self.holes.get_mut(index) else {
            log::trace!("click on out of range hole {} ignored", index);
            return ClickOutcome::NoChange;
        };

        if !hole.is_whackable() {
            return ClickOutcome::NoChange;
        }

        let variant = hole.variant;
        let pending_hide = self.config.has_grace_period();
        if pending_hide {
            hole.hit = true;
        } else {
            *hole = Hole::EMPTY;
        }

        self.score += variant.score_delta();
        log::debug!("whacked {:?} mole at hole {}, score {}", variant, index, self.score);

        ClickOutcome::Whacked {
            variant,
            pending_hide,
            round_over: self.check_round_over(),
        }
    }

    /// Empties a hole whose grace period ran out, leaves anything else alone.
    pub fn clear_hit(&mut self, index: HoleIndex) -> bool {
        match self.holes.get_mut(index) {
            Some(hole) if hole.visible && hole.hit => {
                *hole = Hole::EMPTY;
                true
            }
            _ => false,
        }
    }

    fn check_round_over(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }

        if self.time_left == 0 || self.score >= self.config.win_score {
            self.phase = Phase::Over;
            log::debug!(
                "round over: {:?} with score {}",
                self.verdict(),
                self.score
            );
            true
        } else {
            false
        }
    }
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new_unchecked(Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn spawn(index: HoleIndex, variant: MoleVariant) -> Spawn {
        Spawn {
            index,
            variant,
            clear_grid: false,
        }
    }

    fn playing() -> RoundEngine {
        let mut engine = RoundEngine::default();
        engine.start();
        engine
    }

    #[test]
    fn new_engine_is_idle_and_inert() {
        let mut engine = RoundEngine::default();

        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.countdown_tick(), TickOutcome::NoChange);
        assert_eq!(engine.click_hole(0), ClickOutcome::NoChange);
        assert_eq!(engine.time_left(), 60);
        assert_eq!(engine.verdict(), None);
    }

    #[test]
    fn start_resets_from_any_phase() {
        let mut engine = playing();
        engine.place_mole(spawn(2, MoleVariant::Friendly));
        engine.click_hole(2);
        for _ in 0..60 {
            engine.countdown_tick();
        }
        assert_eq!(engine.phase(), Phase::Over);

        engine.start();

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.time_left(), 60);
        assert!(engine.holes().iter().all(|hole| *hole == Hole::EMPTY));
    }

    #[test]
    fn friendly_hit_scores_and_hides_after_grace() {
        let mut engine = playing();
        engine.place_mole(spawn(3, MoleVariant::Friendly));

        let outcome = engine.click_hole(3);

        assert_eq!(
            outcome,
            ClickOutcome::Whacked {
                variant: MoleVariant::Friendly,
                pending_hide: true,
                round_over: false,
            }
        );
        assert_eq!(engine.score(), 1);
        let hole = engine.hole_at(3).unwrap();
        assert!(hole.visible && hole.hit);

        assert!(engine.clear_hit(3));
        assert_eq!(engine.hole_at(3), Some(Hole::EMPTY));
    }

    #[test]
    fn hostile_hit_goes_negative() {
        let mut engine = playing();
        engine.place_mole(spawn(0, MoleVariant::Hostile));

        engine.click_hole(0);

        assert_eq!(engine.score(), -1);
    }

    #[test]
    fn second_click_during_grace_is_ignored() {
        let mut engine = playing();
        engine.place_mole(spawn(5, MoleVariant::Friendly));

        assert!(engine.click_hole(5).has_update());
        assert_eq!(engine.click_hole(5), ClickOutcome::NoChange);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn no_grace_hides_immediately() {
        let mut engine = RoundEngine::new(RoundConfig::default().with_hide_delay(0)).unwrap();
        engine.start();
        engine.place_mole(spawn(1, MoleVariant::Hostile));

        let outcome = engine.click_hole(1);

        assert!(matches!(
            outcome,
            ClickOutcome::Whacked {
                pending_hide: false,
                ..
            }
        ));
        assert_eq!(engine.hole_at(1), Some(Hole::EMPTY));
    }

    #[test]
    fn clicks_on_empty_or_out_of_range_holes_are_noops() {
        let mut engine = playing();
        engine.place_mole(spawn(4, MoleVariant::Friendly));
        let before = engine.clone();

        assert_eq!(engine.click_hole(0), ClickOutcome::NoChange);
        assert_eq!(engine.click_hole(9), ClickOutcome::NoChange);
        assert_eq!(engine.click_hole(usize::MAX), ClickOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn time_running_out_ends_round_once() {
        let mut engine = playing();

        for _ in 0..59 {
            assert_eq!(engine.countdown_tick(), TickOutcome::Ticked);
        }
        assert_eq!(engine.countdown_tick(), TickOutcome::RoundOver);
        assert_eq!(engine.countdown_tick(), TickOutcome::NoChange);

        assert_eq!(engine.time_left(), 0);
        assert_eq!(engine.phase(), Phase::Over);
        assert_eq!(engine.verdict(), Some(Verdict::TimeUp));
    }

    #[test]
    fn reaching_win_score_ends_round_on_the_click() {
        let mut engine = playing();

        for round in 1..=10 {
            engine.place_mole(spawn(round % 9, MoleVariant::Friendly));
            let outcome = engine.click_hole(round % 9);
            assert_eq!(outcome.ended_round(), round == 10);
            engine.clear_hit(round % 9);
        }

        assert_eq!(engine.phase(), Phase::Over);
        assert_eq!(engine.verdict(), Some(Verdict::Won));

        let frozen = engine.snapshot();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(engine.countdown_tick(), TickOutcome::NoChange);
        assert_eq!(engine.spawn_tick(&mut rng), SpawnOutcome::NoChange);
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn spawn_tick_reveals_exactly_one_mole() {
        let mut engine = playing();
        let mut rng = SmallRng::seed_from_u64(9);

        for expected in 1..=9 {
            assert!(engine.spawn_tick(&mut rng).has_update());
            let visible = engine.holes().iter().filter(|hole| hole.visible).count();
            assert_eq!(visible, expected);
        }
        assert_eq!(engine.spawn_tick(&mut rng), SpawnOutcome::NoChange);
    }

    #[test]
    fn reset_grid_keeps_a_single_mole() {
        let mut engine = RoundEngine::new(RoundConfig::classic()).unwrap();
        engine.start();
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..20 {
            engine.spawn_tick(&mut rng);
            let visible = engine.holes().iter().filter(|hole| hole.visible).count();
            assert_eq!(visible, 1);
        }
    }

    #[test]
    fn score_is_friendly_minus_hostile() {
        let mut engine = playing();
        let hits = [
            MoleVariant::Hostile,
            MoleVariant::Hostile,
            MoleVariant::Friendly,
            MoleVariant::Hostile,
            MoleVariant::Hostile,
        ];

        for (index, variant) in hits.into_iter().enumerate() {
            engine.place_mole(spawn(index, variant));
            engine.click_hole(index);
        }

        assert_eq!(engine.score(), -3);
        assert!(engine.is_playing());
    }

    #[test]
    fn clear_hit_leaves_fresh_moles_alone() {
        let mut engine = playing();
        engine.place_mole(spawn(6, MoleVariant::Hostile));

        assert!(!engine.clear_hit(6));
        assert!(engine.hole_at(6).unwrap().visible);
    }

    #[test]
    fn configs_that_start_finished_are_rejected() {
        let mut config = RoundConfig::default();
        config.duration_secs = 0;
        assert_eq!(RoundEngine::new(config), Err(GameError::ZeroDuration));

        let mut config = RoundConfig::default();
        config.win_score = 0;
        assert_eq!(RoundEngine::new(config), Err(GameError::InvalidWinScore));

        let mut config = RoundConfig::default();
        config.hole_count = 0;
        assert_eq!(RoundEngine::new(config), Err(GameError::NoHoles));

        let mut engine = RoundEngine::new(RoundConfig::default()).unwrap();
        engine.start();
        assert!(engine.is_playing());
        assert!(engine.time_left() > 0);
        assert!(engine.score() < engine.config().win_score);
    }

    #[test]
    fn moles_are_only_placed_during_a_round() {
        let mut engine = RoundEngine::default();
        engine.place_mole(spawn(3, MoleVariant::Friendly));
        assert_eq!(engine.hole_at(3), Some(Hole::EMPTY));

        engine.start();
        for _ in 0..60 {
            engine.countdown_tick();
        }
        assert_eq!(engine.phase(), Phase::Over);

        engine.place_mole(spawn(3, MoleVariant::Friendly));
        assert_eq!(engine.hole_at(3), Some(Hole::EMPTY));
    }

    #[test]
    fn snapshot_serializes() {
        let mut engine = playing();
        engine.place_mole(spawn(2, MoleVariant::Hostile));

        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        let snapshot: RoundSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, engine.snapshot());
        assert_eq!(snapshot.phase, Phase::Playing);
    }
}
