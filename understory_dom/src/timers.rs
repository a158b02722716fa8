// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven timer queue and next-tick queue.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::document::Document;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Identifier of a scheduled timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Pending {
    id: TimerId,
    due: u64,
    task: Task,
}

#[derive(Default)]
pub(crate) struct Timers {
    pending: Vec<Pending>,
    ticks: VecDeque<Task>,
    next_id: u64,
}

impl core::fmt::Debug for Timers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timers")
            .field("pending", &self.pending.len())
            .field("ticks", &self.ticks.len())
            .finish_non_exhaustive()
    }
}

impl Timers {
    pub(crate) fn schedule(&mut self, due: u64, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due, task });
        id
    }

    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub(crate) fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest task due at or before `now`.
    ///
    /// Equal deadlines fire in scheduling order.
    pub(crate) fn pop_due(&mut self, now: u64) -> Option<Task> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(pos).task)
    }

    pub(crate) fn push_tick(&mut self, task: Task) {
        self.ticks.push_back(task);
    }

    pub(crate) fn pop_tick(&mut self) -> Option<Task> {
        self.ticks.pop_front()
    }
}
