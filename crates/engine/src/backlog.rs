// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered queue of jobs that could not run yet.
//!
//! Promoted entries are nulled in place rather than removed, so promotion
//! never shifts the queue. [`Backlog::shrink`] compacts it once at least half
//! of the slots are dead.

#[derive(Debug)]
pub(crate) struct Backlog<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Backlog<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Backlog<T> {
    /// Append a job; returns the number of slots afterwards.
    pub(crate) fn push(&mut self, item: T) -> usize {
        self.slots.push(Some(item));
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the first live entry at or after `from` that satisfies
    /// `eligible`, leaving a null in its slot.
    pub(crate) fn take_first(
        &mut self,
        from: usize,
        eligible: impl Fn(&T) -> bool,
    ) -> Option<(usize, T)> {
        let idx = self
            .slots
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, slot)| slot.as_ref().is_some_and(&eligible))
            .map(|(idx, _)| idx)?;
        self.slots[idx].take().map(|item| (idx, item))
    }

    /// Compact after promotion; returns the live entry count.
    ///
    /// No live entries frees the buffer. Live entries filling at most half
    /// of the slots are copied into a fresh buffer. Otherwise the nulls stay.
    pub(crate) fn shrink(&mut self) -> usize {
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        if live == 0 {
            self.slots = Vec::new();
        } else if live * 2 <= self.slots.len() {
            tracing::debug!(
                "copying backlog to avoid wasting too much space ({live}/{} used)",
                self.slots.len()
            );
            let mut clean = Vec::with_capacity(live);
            clean.extend(self.slots.drain(..).filter(Option::is_some));
            self.slots = clean;
        }
        live
    }
}

#[cfg(test)]
#[path = "backlog_tests.rs"]
mod tests;
