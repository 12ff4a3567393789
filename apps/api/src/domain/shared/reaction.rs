//! Toggleable membership sets (likes, dislikes, subscriptions).
//!
//! A reactable entity carries a positive set and, optionally, a negative set
//! of actor ids. An actor is a member of at most one of them, and the
//! entity's counters always equal the cardinality of the matching set.
//!
//! Stored sets come from JSONB columns that may hold legacy or malformed
//! values, so every set passes through [`normalize_set`] before any toggle
//! logic runs.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// Turn a stored membership list into a set of actor ids.
///
/// Anything that is not a JSON array becomes the empty set. Elements that
/// are not id strings are dropped, and duplicates keep their first position.
pub fn normalize_set(raw: &Value) -> Vec<Uuid> {
    let Some(items) = raw.as_array() else {
        if !raw.is_null() {
            tracing::debug!(stored = %raw, "non-array membership set normalized to empty");
        }
        return Vec::new();
    };

    let mut set = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
            Some(id) if !set.contains(&id) => set.push(id),
            Some(_) => {}
            None => tracing::debug!(element = %item, "dropping malformed membership element"),
        }
    }
    set
}

/// Flip `id`'s membership in `set`. Returns whether `id` is a member afterwards.
pub fn toggle_member(set: &mut Vec<Uuid>, id: Uuid) -> bool {
    if let Some(pos) = set.iter().position(|m| *m == id) {
        set.remove(pos);
        false
    } else {
        set.push(id);
        true
    }
}

/// Result of a single toggle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// The actor is in the requested set after the call.
    pub active: bool,
    /// The actor was removed from the opposite set to keep the sets disjoint.
    pub cleared_opposite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSets {
    positive: Vec<Uuid>,
    negative: Option<Vec<Uuid>>,
}

impl ReactionSets {
    /// Sets for an entity that only supports the positive reaction.
    pub fn positive_only(positive: Vec<Uuid>) -> Self {
        Self {
            positive: dedup(positive),
            negative: None,
        }
    }

    /// Sets for an entity with both polarities.
    ///
    /// An id found in both lists (only possible in legacy rows) is kept in
    /// the positive set.
    pub fn with_negative(positive: Vec<Uuid>, negative: Vec<Uuid>) -> Self {
        let positive = dedup(positive);
        let negative = dedup(negative)
            .into_iter()
            .filter(|id| !positive.contains(id))
            .collect();
        Self {
            positive,
            negative: Some(negative),
        }
    }

    /// Build from raw stored values; `negative` is `None` for positive-only entities.
    pub fn from_stored(positive: &Value, negative: Option<&Value>) -> Self {
        match negative {
            Some(raw) => Self::with_negative(normalize_set(positive), normalize_set(raw)),
            None => Self::positive_only(normalize_set(positive)),
        }
    }

    pub fn supports_negative(&self) -> bool {
        self.negative.is_some()
    }

    pub fn positive(&self) -> &[Uuid] {
        &self.positive
    }

    pub fn negative(&self) -> &[Uuid] {
        self.negative.as_deref().unwrap_or(&[])
    }

    pub fn positive_count(&self) -> i64 {
        self.positive.len() as i64
    }

    pub fn negative_count(&self) -> i64 {
        self.negative().len() as i64
    }

    pub fn contains(&self, polarity: Polarity, actor: Uuid) -> bool {
        match polarity {
            Polarity::Positive => self.positive.contains(&actor),
            Polarity::Negative => self.negative().contains(&actor),
        }
    }

    /// Which set, if any, currently holds `actor`.
    pub fn state_of(&self, actor: Uuid) -> Option<Polarity> {
        if self.contains(Polarity::Positive, actor) {
            Some(Polarity::Positive)
        } else if self.contains(Polarity::Negative, actor) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn into_parts(self) -> (Vec<Uuid>, Vec<Uuid>) {
        (self.positive, self.negative.unwrap_or_default())
    }

    pub fn toggle(&mut self, actor: Uuid, polarity: Polarity) -> Result<ToggleOutcome, DomainError> {
        if polarity == Polarity::Negative && self.negative.is_none() {
            return Err(DomainError::ValidationError(
                "This resource does not support negative reactions".into(),
            ));
        }

        if self.contains(polarity, actor) {
            self.set_mut(polarity).retain(|m| *m != actor);
            return Ok(ToggleOutcome {
                active: false,
                cleared_opposite: false,
            });
        }

        let opposite = polarity.opposite();
        let cleared_opposite = self.contains(opposite, actor);
        if cleared_opposite {
            self.set_mut(opposite).retain(|m| *m != actor);
        }
        self.set_mut(polarity).push(actor);

        Ok(ToggleOutcome {
            active: true,
            cleared_opposite,
        })
    }

    fn set_mut(&mut self, polarity: Polarity) -> &mut Vec<Uuid> {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => self.negative.get_or_insert_with(Vec::new),
        }
    }
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// An entity carrying reaction sets and the counters derived from them.
pub trait Reactable {
    fn reactions(&self) -> ReactionSets;

    /// Store `sets` on the entity and recompute its counters.
    fn apply_reactions(&mut self, sets: ReactionSets);
}

/// Toggle `actor`'s `polarity` reaction on `entity` in place.
pub fn toggle<R: Reactable>(
    entity: &mut R,
    actor: Uuid,
    polarity: Polarity,
) -> Result<ToggleOutcome, DomainError> {
    let mut sets = entity.reactions();
    let outcome = sets.toggle(actor, polarity)?;
    entity.apply_reactions(sets);
    Ok(outcome)
}
