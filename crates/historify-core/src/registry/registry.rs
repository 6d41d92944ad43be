//! History registry - typed map from base entity type to its history schema
//!
//! Built once during startup through `HistoryRegistryBuilder`, then frozen and
//! shared read-only.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::info;

use crate::error::HistoryError;
use crate::traits::Historified;

use super::schema::HistorySchema;

/// Typed handle to the history schema of `T`
pub struct HistoryHandle<T> {
    schema: Arc<HistorySchema>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> HistoryHandle<T> {
    fn new(schema: Arc<HistorySchema>) -> Self {
        Self {
            schema,
            _entity: PhantomData,
        }
    }

    pub fn schema(&self) -> &HistorySchema {
        &self.schema
    }
}

impl<T> Clone for HistoryHandle<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.schema))
    }
}

impl<T> fmt::Debug for HistoryHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryHandle")
            .field("history_table", &self.schema.history_table)
            .finish()
    }
}

/// Collects registrations during startup
#[derive(Debug, Default)]
pub struct HistoryRegistryBuilder {
    schemas: HashMap<TypeId, Arc<HistorySchema>>,
}

impl HistoryRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base entity type for history recording
    ///
    /// Registering the same type twice, or two types that map onto the same
    /// history table, is an error.
    pub fn register<T: Historified>(&mut self) -> Result<HistoryHandle<T>, HistoryError> {
        let type_id = TypeId::of::<T>();
        if self.schemas.contains_key(&type_id) {
            return Err(HistoryError::AlreadyRegistered(T::ENTITY_NAME));
        }

        let schema = HistorySchema::of::<T>()?;
        if self
            .schemas
            .values()
            .any(|existing| existing.history_table == schema.history_table)
        {
            return Err(HistoryError::DuplicateHistoryTable(schema.history_table));
        }

        info!(
            entity = schema.entity_name,
            history_table = %schema.history_table,
            "Registered entity for history"
        );

        let schema = Arc::new(schema);
        self.schemas.insert(type_id, Arc::clone(&schema));
        Ok(HistoryHandle::new(schema))
    }

    /// Freeze the registrations
    pub fn build(self) -> HistoryRegistry {
        HistoryRegistry {
            schemas: self.schemas,
        }
    }
}

/// Immutable registry of history schemas
#[derive(Debug, Default)]
pub struct HistoryRegistry {
    schemas: HashMap<TypeId, Arc<HistorySchema>>,
}

impl HistoryRegistry {
    pub fn builder() -> HistoryRegistryBuilder {
        HistoryRegistryBuilder::new()
    }

    /// Look up the schema registered for `T`
    pub fn get<T: Historified>(&self) -> Option<&HistorySchema> {
        self.schemas.get(&TypeId::of::<T>()).map(AsRef::as_ref)
    }

    /// Look up the schema registered for `T`, failing if absent
    pub fn require<T: Historified>(&self) -> Result<&HistorySchema, HistoryError> {
        self.get::<T>()
            .ok_or(HistoryError::NotRegistered(T::ENTITY_NAME))
    }

    /// Typed handle for `T`
    pub fn handle<T: Historified>(&self) -> Option<HistoryHandle<T>> {
        self.schemas
            .get(&TypeId::of::<T>())
            .map(|schema| HistoryHandle::new(Arc::clone(schema)))
    }

    pub fn contains<T: Historified>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    /// All registered schemas, in no particular order
    pub fn schemas(&self) -> impl Iterator<Item = &HistorySchema> {
        self.schemas.values().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
