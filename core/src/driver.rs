use alloc::collections::BTreeMap;
use rand::Rng;

use crate::*;

/// Runs a [`RoundEngine`] against a [`Scheduler`], a random source and an [`AudioSink`].
///
/// Countdown and spawn triggers are armed by [`start`](Self::start) and cancelled as soon as the round is no longer
/// being played. Every whacked mole gets its own hide task.
#[derive(Debug)]
pub struct RoundDriver<R, A> {
    engine: RoundEngine,
    scheduler: Scheduler,
    rng: R,
    audio: A,
    countdown: Option<TaskId>,
    spawner: Option<TaskId>,
    hides: BTreeMap<HoleIndex, TaskId>,
}

impl<R: Rng, A: AudioSink> RoundDriver<R, A> {
    pub fn new(config: RoundConfig, rng: R, audio: A) -> Result<Self> {
        Ok(Self {
            engine: RoundEngine::new(config)?,
            scheduler: Scheduler::new(),
            rng,
            audio,
            countdown: None,
            spawner: None,
            hides: BTreeMap::new(),
        })
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.engine.snapshot()
    }

    /// Whether the countdown and spawn triggers are running.
    pub fn is_armed(&self) -> bool {
        self.countdown.is_some() || self.spawner.is_some()
    }

    pub fn start(&mut self) {
        if let Err(err) = self.audio.prime() {
            log::warn!("could not prime audio: {}", err);
        }

        self.scheduler.cancel_all();
        self.hides.clear();
        self.engine.start();

        let config = *self.engine.config();
        self.countdown = Some(
            self.scheduler
                .every(config.countdown_period_ms, Task::Countdown),
        );
        self.spawner = Some(self.scheduler.every(config.spawn_period_ms, Task::Spawn));
    }

    pub fn advance(&mut self, elapsed: Millis) -> bool {
        self.advance_to(self.scheduler.now().saturating_add(elapsed))
    }

    /// Runs everything due up to `now`, returns whether the snapshot changed.
    pub fn advance_to(&mut self, now: Millis) -> bool {
        let mut updated = false;
        while let Some((id, task)) = self.scheduler.pop_due(now) {
            updated |= self.run_task(id, task);
        }
        self.scheduler.advance_to(now);
        updated
    }

    pub fn click(&mut self, index: HoleIndex) -> ClickOutcome {
        let outcome = self.engine.click_hole(index);

        if let ClickOutcome::Whacked {
            variant,
            pending_hide,
            round_over,
        } = outcome
        {
            if let Err(err) = self.audio.play(variant.cue()) {
                log::warn!("could not play {:?} cue: {}", variant.cue(), err);
            }

            if pending_hide {
                let delay = self.engine.config().hide_delay_ms;
                let id = self.scheduler.after(delay, Task::Hide(index));
                if let Some(stale) = self.hides.insert(index, id) {
                    self.scheduler.cancel(stale);
                }
            }

            if round_over {
                self.disarm();
            }
        }

        outcome
    }

    fn run_task(&mut self, id: TaskId, task: Task) -> bool {
        let updated = match task {
            Task::Countdown => {
                let outcome = self.engine.countdown_tick();
                if outcome == TickOutcome::RoundOver {
                    self.disarm();
                }
                outcome.has_update()
            }
            Task::Spawn => self.engine.spawn_tick(&mut self.rng).has_update(),
            Task::Hide(index) => {
                if self.hides.get(&index) == Some(&id) {
                    self.hides.remove(&index);
                }
                self.engine.clear_hit(index)
            }
        };

        if !self.engine.is_playing() && self.is_armed() {
            self.disarm();
        }

        updated
    }

    fn disarm(&mut self) {
        for id in [self.countdown.take(), self.spawner.take()].into_iter().flatten() {
            self.scheduler.cancel(id);
        }
        log::debug!("round timers stopped at {}ms", self.scheduler.now());
    }
}
