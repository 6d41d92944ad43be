//! Pending-change tracking for base entities
//!
//! `Tracked<T>` keeps the committed column values next to the live entity so
//! the update hook can tell which columns the current transaction touched.

use std::ops::{Deref, DerefMut};

use crate::entities::{ChangeSet, FieldChange};
use crate::traits::Historified;
use crate::value_objects::FieldValue;

/// Column values as last committed
type Snapshot = Vec<(&'static str, FieldValue)>;

/// A base entity together with its committed column state
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    current: T,
    committed: Option<Snapshot>,
}

impl<T: Historified> Tracked<T> {
    /// Wrap an entity that has never been persisted
    pub fn new(entity: T) -> Self {
        Self {
            current: entity,
            committed: None,
        }
    }

    /// Wrap an entity freshly loaded from storage
    pub fn loaded(entity: T) -> Self {
        let committed = Some(entity.columns());
        Self {
            current: entity,
            committed,
        }
    }

    /// Check if the entity has a committed state to diff against
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.committed.is_some()
    }

    /// Mutable access to the live entity
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// Record the current state as committed, after a successful flush
    pub fn mark_persisted(&mut self) {
        self.committed = Some(self.current.columns());
    }

    /// Columns whose live value differs from the committed one
    ///
    /// Bookkeeping columns are skipped. An entity with no committed state has
    /// no changes.
    pub fn changes(&self) -> ChangeSet {
        let Some(committed) = &self.committed else {
            return ChangeSet::new();
        };

        let bookkeeping = T::bookkeeping_columns();
        let mut changes = ChangeSet::new();

        for (name, now) in self.current.columns() {
            if bookkeeping.contains(&name) {
                continue;
            }

            let before = committed
                .iter()
                .find(|(committed_name, _)| *committed_name == name)
                .map(|(_, value)| value);

            match before {
                Some(before) if *before == now => {}
                Some(before) => {
                    changes.insert(
                        name.to_string(),
                        FieldChange::new(before.to_string(), now.to_string()),
                    );
                }
                None => {
                    changes.insert(
                        name.to_string(),
                        FieldChange::new(FieldValue::Null.to_string(), now.to_string()),
                    );
                }
            }
        }

        changes
    }

    #[inline]
    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty()
    }

    pub fn into_inner(self) -> T {
        self.current
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.current
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.current
    }
}
