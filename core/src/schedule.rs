use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cancellation token for a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u32);

/// Work the round driver knows how to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    Countdown,
    Spawn,
    Hide(HoleIndex),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: TaskId,
    task: Task,
    due: Millis,
    period: Option<Millis>,
}

/// Virtual clock with periodic and one-shot tasks.
///
/// The clock only moves when asked to, which keeps the round logic deterministic: the browser feeds it
/// wall time while tests feed it whatever they like. Tasks due at the same instant run in the order they were armed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    now: Millis,
    next_id: u32,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Runs `task` every `period` milliseconds, starting one period from now.
    pub fn every(&mut self, period: Millis, task: Task) -> TaskId {
        let period = period.max(1);
        self.push(task, self.now + period, Some(period))
    }

    pub fn after(&mut self, delay: Millis, task: Task) -> TaskId {
        self.push(task, self.now + delay, None)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TaskId, Task)> {
        let (position, entry) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, entry)| (position, *entry))?;

        self.now = self.now.max(entry.due);
        match entry.period {
            Some(period) => self.entries[position].due += period,
            None => {
                self.entries.swap_remove(position);
            }
        }

        Some((entry.id, entry.task))
    }

    /// Moves the clock forward, never backwards.
    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    fn push(&mut self, task: Task, due: Millis, period: Option<Millis>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            id,
            task,
            due,
            period,
        });
        id
    }
}
