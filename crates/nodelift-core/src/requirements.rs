//! Label requirement algebra.
//!
//! A `Requirement` is a single label-key predicate; `Requirements` is a keyed
//! collection holding at most one requirement per key. Two operations drive
//! scheduling:
//!
//! - **`compatible`**: do two requirement sets admit a common node label
//!   assignment
//! - **`intersect`**: narrow one set by another, used to tighten schedule
//!   constraints as pods join
//!
//! Predicates range over the domain "all label values, plus absence of the
//! key". `In`/`NotIn` require the key to be present; `Exists` admits any
//! value; `DoesNotExist` admits only absence.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the requirement algebra.
#[derive(Debug, Error)]
pub enum RequirementsError {
    /// No node label assignment satisfies both predicates for `key`.
    #[error("incompatible requirements for {key}: {left} vs {right}")]
    Incompatible {
        key: String,
        left: Operator,
        right: Operator,
    },
}

pub type RequirementsResult<T> = Result<T, RequirementsError>;

/// A label-value predicate.
///
/// The set is closed under intersection: intersecting any two variants
/// yields another variant, so a `Requirements` map can always hold exactly
/// one predicate per key. `In` of the empty set is the canonical
/// unsatisfiable predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// The key must be present with a value in the set.
    In(BTreeSet<String>),
    /// The key must be present with a value outside the set.
    NotIn(BTreeSet<String>),
    /// The key must be present, any value.
    Exists,
    /// The key must be absent.
    DoesNotExist,
}

impl Operator {
    /// Intersect two predicates over the same key.
    pub fn intersect(&self, other: &Operator) -> Operator {
        use Operator::*;
        match (self, other) {
            (In(a), In(b)) => In(a.intersection(b).cloned().collect()),
            (In(a), NotIn(b)) | (NotIn(b), In(a)) => In(a.difference(b).cloned().collect()),
            (In(a), Exists) | (Exists, In(a)) => In(a.clone()),
            (NotIn(a), NotIn(b)) => NotIn(a.union(b).cloned().collect()),
            (NotIn(a), Exists) | (Exists, NotIn(a)) => NotIn(a.clone()),
            (Exists, Exists) => Exists,
            // Both demand absence, which is itself a satisfying assignment.
            (DoesNotExist, DoesNotExist) => DoesNotExist,
            // Absence conflicts with any predicate requiring the key.
            (DoesNotExist, _) | (_, DoesNotExist) => In(BTreeSet::new()),
        }
    }

    /// True when no label assignment satisfies the predicate.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, Operator::In(values) if values.is_empty())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(values: &BTreeSet<String>) -> String {
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        }
        match self {
            Operator::In(values) => write!(f, "In [{}]", join(values)),
            Operator::NotIn(values) => write!(f, "NotIn [{}]", join(values)),
            Operator::Exists => write!(f, "Exists"),
            Operator::DoesNotExist => write!(f, "DoesNotExist"),
        }
    }
}

/// A single named requirement: "this key's value must satisfy the predicate".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub key: String,
    pub operator: Operator,
}

impl Requirement {
    pub fn in_values<K, V, I>(key: K, values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        Self {
            key: key.into(),
            operator: Operator::In(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn not_in<K, V, I>(key: K, values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        Self {
            key: key.into(),
            operator: Operator::NotIn(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn exists(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: Operator::Exists,
        }
    }

    pub fn does_not_exist(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: Operator::DoesNotExist,
        }
    }
}

/// A keyed set of requirements, at most one per key.
///
/// The empty set is the universal constraint and matches anything.
/// Inserting a requirement for a key that already has one intersects the
/// two predicates rather than overwriting, so the one-per-key invariant
/// holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    requirements: BTreeMap<String, Operator>,
}

impl Requirements {
    pub fn new(requirements: impl IntoIterator<Item = Requirement>) -> Self {
        let mut set = Self::default();
        for requirement in requirements {
            set.insert(requirement);
        }
        set
    }

    /// Add a requirement, intersecting with any existing one for the key.
    pub fn insert(&mut self, requirement: Requirement) {
        let Requirement { key, operator } = requirement;
        match self.requirements.entry(key) {
            Entry::Occupied(mut existing) => {
                let merged = existing.get().intersect(&operator);
                existing.insert(merged);
            }
            Entry::Vacant(slot) => {
                slot.insert(operator);
            }
        }
    }

    /// Keys constrained by this set, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.requirements.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Operator> {
        self.requirements.get(key)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Test whether both sets admit a common node label assignment.
    ///
    /// For every key present in both sets the predicates must intersect;
    /// keys present in only one set impose no constraint on the other.
    /// Returns the first conflicting key found. The verdict is symmetric,
    /// only the error's left/right attribution follows argument order.
    pub fn compatible(&self, other: &Requirements) -> RequirementsResult<()> {
        for (key, left) in &self.requirements {
            let Some(right) = other.requirements.get(key) else {
                continue;
            };
            if left.intersect(right).is_unsatisfiable() {
                return Err(RequirementsError::Incompatible {
                    key: key.clone(),
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
        Ok(())
    }

    /// Per-key intersection of two sets, unioning keys present on only one
    /// side. Never fails; an unsatisfiable entry is representable and left
    /// for feasibility checks to reject.
    pub fn intersect(&self, other: &Requirements) -> Requirements {
        let mut merged = self.clone();
        for (key, operator) in &other.requirements {
            merged.insert(Requirement {
                key: key.clone(),
                operator: operator.clone(),
            });
        }
        merged
    }

    /// Allowed values for a key, when pinned by an `In` predicate.
    pub fn values_for(&self, key: &str) -> Option<&BTreeSet<String>> {
        match self.requirements.get(key) {
            Some(Operator::In(values)) => Some(values),
            _ => None,
        }
    }

    /// Zones admitted by this set, when pinned. Used by downstream
    /// instance selection.
    pub fn zones(&self) -> Option<&BTreeSet<String>> {
        self.values_for(crate::labels::TOPOLOGY_ZONE)
    }

    /// Capacity types admitted by this set, when pinned.
    pub fn capacity_types(&self) -> Option<&BTreeSet<String>> {
        self.values_for(crate::labels::CAPACITY_TYPE)
    }
}
