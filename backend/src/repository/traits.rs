//! Repository Layer - Core Traits
//!
//! Storage-agnostic interfaces the command layer is written against.

use async_trait::async_trait;
use crate::domain::{DomainError, DomainResult, Entity};

/// CRUD over one entity type
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert and return the stored entity with its assigned id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Write the mutable fields; `NotFound` if the row is gone
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// `NotFound` if nothing was deleted
    async fn delete(&self, id: T::Id) -> DomainResult<()>;

    /// Like `find_by_id`, but a missing row is `NotFound`
    async fn require(&self, id: T::Id) -> DomainResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, id))
    }
}

/// Repositories with a text search
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    async fn search(&self, query: &str) -> DomainResult<Vec<T>>;
}
