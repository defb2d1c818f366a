// src/domain/scope.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Tenant identifier. `0` is reserved for global records (super administrators
/// in a multi-company deployment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub i32);

impl EntityId {
    pub fn new(id: i32) -> DomainResult<Self> {
        if id < 0 {
            Err(DomainError::Validation("entity id must not be negative".into()))
        } else {
            Ok(Self(id))
        }
    }

    pub fn is_global(&self) -> bool {
        self.0 == 0
    }
}

impl From<EntityId> for i32 {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entities whose events a caller may read. Writes (purges) only ever touch
/// `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityScope {
    current: EntityId,
    visible: Vec<EntityId>,
}

impl EntityScope {
    pub fn new(current: EntityId, shared: impl IntoIterator<Item = EntityId>) -> Self {
        let mut visible: Vec<EntityId> = shared.into_iter().collect();
        visible.push(current);
        visible.sort();
        visible.dedup();
        Self { current, visible }
    }

    pub fn single(current: EntityId) -> Self {
        Self::new(current, std::iter::empty())
    }

    pub fn current(&self) -> EntityId {
        self.current
    }

    pub fn visible(&self) -> &[EntityId] {
        &self.visible
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.visible.binary_search(&entity).is_ok()
    }

    pub fn visible_ids(&self) -> Vec<i32> {
        self.visible.iter().map(|e| e.0).collect()
    }
}
