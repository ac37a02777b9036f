use std::collections::HashMap;

use bytes::Bytes;

use crate::catalog::Selection;
use crate::endpoint::ContentKind;

/// Decoded body of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Bytes),
}

impl Payload {
    pub fn content_kind(&self) -> ContentKind {
        match self {
            Payload::Text(_) => ContentKind::Text,
            Payload::Binary(_) => ContentKind::Binary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchOutcome {
    #[default]
    Idle,
    Loading,
    Success(Payload),
    Error(String),
}

impl FetchOutcome {
    /// `Success` or `Error`: the slot will not be fetched again on navigation.
    pub fn is_resolved(&self) -> bool {
        matches!(self, FetchOutcome::Success(_) | FetchOutcome::Error(_))
    }
}

static IDLE: FetchOutcome = FetchOutcome::Idle;

/// Latest outcome per slot for the current session. No eviction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceCache {
    slots: HashMap<Selection, FetchOutcome>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for `slot`; slots never touched read as `Idle`.
    pub fn get(&self, slot: &Selection) -> &FetchOutcome {
        self.slots.get(slot).unwrap_or(&IDLE)
    }

    pub fn insert(&mut self, slot: Selection, outcome: FetchOutcome) {
        if outcome == FetchOutcome::Idle {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, outcome);
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Selection, &FetchOutcome)> {
        self.slots.iter()
    }
}
