// SPDX-License-Identifier: MPL-2.0
//! Displayed-message queue.
//!
//! `QueueState` is the synchronous core of a display surface: admission
//! (de-duplication, capacity bound) and identity-keyed removal. It holds no
//! timers and no channels; the surface actor drives it one step at a time.

use crate::config::DEFAULT_ALLOW_DUPLICATES;
use crate::domain::MaxDisplayed;
use crate::message::{Message, MessageId};
use std::collections::VecDeque;

/// How many removed ids are remembered to refuse re-admission.
pub const RETIRED_MEMORY: usize = 64;

/// Why a message left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retirement {
    /// Its display time ran out.
    Expired,
    /// The user tapped it.
    Tapped,
    /// The user swiped it away past the threshold.
    Swiped,
    /// Dismissed programmatically or through a close button.
    Dismissed,
    /// Pushed out by a newer message when the queue was full.
    Evicted,
    /// Removed by [`QueueState::clear`].
    Cleared,
}

/// Outcome of offering a message to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Appended to the tail. `evicted` lists the messages dropped from the
    /// head to respect the capacity, oldest first.
    Admitted { evicted: Vec<Message> },
    /// Discarded because duplicates are disallowed and `existing` shows the
    /// same content.
    Duplicate { existing: MessageId },
    /// Discarded because a message with this id is displayed or was
    /// recently removed and its expiry has not been processed yet.
    AlreadySeen,
}

impl Admission {
    /// Returns true if the message became displayed.
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Admission rules of one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    pub max_displayed: MaxDisplayed,
    pub allow_duplicates: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::new(MaxDisplayed::default(), DEFAULT_ALLOW_DUPLICATES)
    }
}

impl AdmissionPolicy {
    #[must_use]
    pub fn new(max_displayed: MaxDisplayed, allow_duplicates: bool) -> Self {
        Self {
            max_displayed,
            allow_duplicates,
        }
    }
}

/// Ordered set of displayed messages, oldest first.
#[derive(Debug, Default)]
pub struct QueueState {
    displayed: VecDeque<Message>,
    /// Removed ids whose expiry may still be pending, oldest first. Bounded
    /// by [`RETIRED_MEMORY`] and pruned by [`QueueState::expire`].
    retired: VecDeque<MessageId>,
    policy: AdmissionPolicy,
}

impl QueueState {
    /// Creates an empty queue governed by `policy`.
    #[must_use]
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self {
            displayed: VecDeque::with_capacity(policy.max_displayed.value() + 1),
            retired: VecDeque::with_capacity(RETIRED_MEMORY),
            policy,
        }
    }

    /// Offers an arriving message.
    ///
    /// Duplicates are checked before the capacity bound, so a suppressed
    /// duplicate never evicts anything. The admitted message itself is never
    /// evicted.
    pub fn arrive(&mut self, message: Message) -> Admission {
        if self.contains(message.id()) || self.retired.contains(&message.id()) {
            return Admission::AlreadySeen;
        }

        if !self.policy.allow_duplicates {
            if let Some(existing) = self.displayed.iter().find(|m| m.matches(&message)) {
                return Admission::Duplicate {
                    existing: existing.id(),
                };
            }
        }

        self.displayed.push_back(message);

        let mut evicted = Vec::new();
        while self.displayed.len() > self.policy.max_displayed.value() {
            if let Some(oldest) = self.displayed.pop_front() {
                self.remember(oldest.id());
                evicted.push(oldest);
            }
        }
        Admission::Admitted { evicted }
    }

    /// Removes the message with `id` if it is displayed.
    ///
    /// Returns `None` when it is already gone, which makes every removal
    /// path (expiry, tap, swipe) safe to repeat or race.
    pub fn remove(&mut self, id: MessageId) -> Option<Message> {
        let pos = self.displayed.iter().position(|m| m.id() == id)?;
        let removed = self.displayed.remove(pos)?;
        self.remember(id);
        Some(removed)
    }

    /// Handles the expiry of `id`: removes it if displayed and forgets it,
    /// since no timer for it can fire again.
    pub fn expire(&mut self, id: MessageId) -> Option<Message> {
        let pos = self.displayed.iter().position(|m| m.id() == id);
        self.retired.retain(|retired| *retired != id);
        pos.and_then(|pos| self.displayed.remove(pos))
    }

    /// Removes every displayed message, oldest first.
    pub fn clear(&mut self) -> Vec<Message> {
        let cleared: Vec<Message> = self.displayed.drain(..).collect();
        for message in &cleared {
            self.remember(message.id());
        }
        cleared
    }

    fn remember(&mut self, id: MessageId) {
        if self.retired.len() == RETIRED_MEMORY {
            self.retired.pop_front();
        }
        self.retired.push_back(id);
    }

    /// Returns the displayed messages, oldest first.
    pub fn displayed(&self) -> impl Iterator<Item = &Message> {
        self.displayed.iter()
    }

    /// Returns whether a message with `id` is displayed.
    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.displayed.iter().any(|m| m.id() == id)
    }

    /// Returns the number of displayed messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    /// Returns whether nothing is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    /// Returns the admission rules.
    #[must_use]
    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Copies the displayed messages into a shareable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> std::sync::Arc<[Message]> {
        self.displayed.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(max: usize, allow_duplicates: bool) -> QueueState {
        QueueState::new(AdmissionPolicy::new(MaxDisplayed::new(max), allow_duplicates))
    }

    fn ids(state: &QueueState) -> Vec<MessageId> {
        state.displayed().map(Message::id).collect()
    }

    #[test]
    fn default_policy_allows_duplicates() {
        let policy = AdmissionPolicy::default();
        assert!(policy.allow_duplicates);
        assert_eq!(policy.max_displayed.value(), 5);
    }

    #[test]
    fn new_queue_is_empty() {
        let state = queue(5, true);
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn arrive_appends_in_arrival_order() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let m2 = Message::info("two");
        let expected = vec![m1.id(), m2.id()];

        assert!(state.arrive(m1).is_admitted());
        assert!(state.arrive(m2).is_admitted());
        assert_eq!(ids(&state), expected);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut state = queue(2, true);
        let m1 = Message::info("one");
        let m2 = Message::info("two");
        let m3 = Message::info("three");
        let (id1, id2, id3) = (m1.id(), m2.id(), m3.id());

        state.arrive(m1);
        state.arrive(m2);
        let admission = state.arrive(m3);

        match admission {
            Admission::Admitted { evicted } => {
                assert_eq!(evicted.iter().map(Message::id).collect::<Vec<_>>(), vec![id1]);
            }
            other => panic!("expected admission, got {other:?}"),
        }
        assert_eq!(ids(&state), vec![id2, id3]);
    }

    #[test]
    fn capacity_of_one_keeps_newest() {
        let mut state = queue(1, true);
        let newest = Message::info("newest");
        let newest_id = newest.id();

        state.arrive(Message::info("old"));
        state.arrive(newest);
        assert_eq!(ids(&state), vec![newest_id]);
    }

    #[test]
    fn duplicate_is_suppressed_when_disallowed() {
        let mut state = queue(5, false);
        let m1 = Message::info("Saved");
        let id1 = m1.id();

        state.arrive(m1);
        let admission = state.arrive(Message::info("Saved"));

        assert_eq!(admission, Admission::Duplicate { existing: id1 });
        assert_eq!(ids(&state), vec![id1]);
    }

    #[test]
    fn duplicate_is_admitted_when_allowed() {
        let mut state = queue(5, true);
        state.arrive(Message::info("Saved"));
        assert!(state.arrive(Message::info("Saved")).is_admitted());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn same_text_different_level_is_not_a_duplicate() {
        let mut state = queue(5, false);
        state.arrive(Message::info("Saved"));
        assert!(state.arrive(Message::error("Saved")).is_admitted());
    }

    #[test]
    fn suppressed_duplicate_does_not_evict() {
        let mut state = queue(2, false);
        let m1 = Message::info("one");
        let m2 = Message::info("two");
        let expected = vec![m1.id(), m2.id()];

        state.arrive(m1);
        state.arrive(m2);
        state.arrive(Message::info("two"));
        assert_eq!(ids(&state), expected);
    }

    #[test]
    fn duplicate_admitted_again_after_original_leaves() {
        let mut state = queue(5, false);
        let m1 = Message::info("Saved");
        let id1 = m1.id();

        state.arrive(m1);
        state.remove(id1);
        assert!(state.arrive(Message::info("Saved")).is_admitted());
    }

    #[test]
    fn removed_message_never_reenters() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let copy = m1.clone();

        state.arrive(m1);
        state.remove(copy.id());
        assert_eq!(state.arrive(copy), Admission::AlreadySeen);
        assert!(state.is_empty());
    }

    #[test]
    fn same_message_twice_is_displayed_once() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");

        state.arrive(m1.clone());
        assert_eq!(state.arrive(m1), Admission::AlreadySeen);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let id = m1.id();
        state.arrive(m1);

        assert!(state.remove(id).is_some());
        assert!(state.remove(id).is_none());
        assert!(state.remove(id).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn remove_after_eviction_is_noop() {
        let mut state = queue(1, true);
        let m1 = Message::info("one");
        let id1 = m1.id();
        let m2 = Message::info("two");
        let id2 = m2.id();

        state.arrive(m1);
        state.arrive(m2);
        assert!(state.remove(id1).is_none());
        assert_eq!(ids(&state), vec![id2]);
    }

    #[test]
    fn remove_keeps_order_of_survivors() {
        let mut state = queue(5, true);
        let messages: Vec<Message> = (0..4).map(|i| Message::info(format!("m{i}"))).collect();
        let all: Vec<MessageId> = messages.iter().map(Message::id).collect();
        for m in messages {
            state.arrive(m);
        }

        state.remove(all[1]);
        assert_eq!(ids(&state), vec![all[0], all[2], all[3]]);
    }

    #[test]
    fn capacity_holds_after_every_arrival() {
        let mut state = queue(3, false);
        for i in 0..50 {
            state.arrive(Message::info(format!("m{}", i % 7)));
            assert!(state.len() <= 3);
        }
    }

    #[test]
    fn expire_removes_and_forgets() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let copy = m1.clone();

        state.arrive(m1);
        assert!(state.expire(copy.id()).is_some());
        assert!(state.expire(copy.id()).is_none());
        assert!(state.retired.is_empty());
    }

    #[test]
    fn expire_after_tap_forgets_retired_id() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let id = m1.id();

        state.arrive(m1);
        state.remove(id);
        assert_eq!(state.retired.len(), 1);

        assert!(state.expire(id).is_none());
        assert!(state.retired.is_empty());
    }

    #[test]
    fn retired_ids_stay_bounded_over_many_cycles() {
        let mut state = queue(5, true);
        for i in 0..100_000 {
            let message = Message::info(format!("m{i}"));
            let id = message.id();
            state.arrive(message);
            state.remove(id);
        }

        assert!(state.is_empty());
        assert_eq!(state.retired.len(), RETIRED_MEMORY);
    }

    #[test]
    fn retired_ids_drain_when_timers_fire() {
        let mut state = queue(5, true);
        let mut ids = Vec::new();
        for i in 0..1_000 {
            let message = Message::info(format!("m{i}"));
            ids.push(message.id());
            state.arrive(message);
        }
        for id in ids {
            state.expire(id);
        }

        assert!(state.is_empty());
        assert!(state.retired.is_empty());
    }

    #[test]
    fn evicted_message_cannot_come_back() {
        let mut state = queue(1, true);
        let m1 = Message::info("one");
        let copy = m1.clone();

        state.arrive(m1);
        state.arrive(Message::info("two"));
        assert_eq!(state.arrive(copy), Admission::AlreadySeen);
    }

    #[test]
    fn clear_removes_all_in_order() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let m2 = Message::info("two");
        let expected = vec![m1.id(), m2.id()];
        state.arrive(m1);
        state.arrive(m2);

        let cleared: Vec<MessageId> = state.clear().iter().map(Message::id).collect();
        assert_eq!(cleared, expected);
        assert!(state.is_empty());
    }

    #[test]
    fn snapshot_reflects_queue_order() {
        let mut state = queue(5, true);
        let m1 = Message::info("one");
        let id1 = m1.id();
        state.arrive(m1);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), id1);
        assert!(state.contains(id1));
    }
}
