//! Generic entity service
//!
//! [`EntityService`] is the seam between view components and the network:
//! components hold an `Arc<dyn EntityService<E>>`, production code plugs in
//! a [`RestEntityService`], and tests plug in an in-memory fake.
//!
//! Services do not catch errors. Every failure propagates to the caller as
//! a `SyncError`.

use crate::http::RestClient;
use crate::response::ResponseWrapper;
use async_trait::async_trait;
use larder_core::{Entity, EntityId, RequestOptions, SyncError, SyncResult};
use std::marker::PhantomData;
use tracing::debug;

// ============================================================================
// EntityService Trait
// ============================================================================

/// CRUD and search operations for one entity type
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Send a draft; returns the server's authoritative copy
    async fn create(&self, entity: &E) -> SyncResult<E>;

    /// Replace a persisted entity; the entity must carry an id
    async fn update(&self, entity: &E) -> SyncResult<E>;

    /// Fetch one entity; unknown ids fail with `NotFound`
    async fn find(&self, id: EntityId) -> SyncResult<E>;

    /// Fetch a page of entities
    async fn query(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>>;

    /// Fetch a page of full-text search results
    async fn search(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>>;

    /// Delete an entity
    async fn delete(&self, id: EntityId) -> SyncResult<()>;
}

// ============================================================================
// RestEntityService
// ============================================================================

/// [`EntityService`] over HTTP, using the conventional resource paths
#[derive(Debug)]
pub struct RestEntityService<E> {
    client: RestClient,
    resource_path: String,
    search_path: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RestEntityService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource_path: self.resource_path.clone(),
            search_path: self.search_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> RestEntityService<E> {
    /// Bind a client to `E`'s resource paths
    pub fn new(client: RestClient) -> Self {
        let resource = E::resource();
        Self {
            client,
            resource_path: resource.resource_path(),
            search_path: resource.search_path(),
            _entity: PhantomData,
        }
    }

    /// Path of the collection, e.g. `api/reviews`
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Path of the search endpoint, e.g. `api/_search/reviews`
    pub fn search_path(&self) -> &str {
        &self.search_path
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}/{}", self.resource_path, id)
    }

    async fn list(&self, path: &str, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>> {
        let reply = self
            .client
            .get::<Vec<E::Wire>>(path, &options.to_query_pairs())
            .await?;
        let items = reply.body.into_iter().map(E::from_wire).collect();
        Ok(ResponseWrapper::new(items, reply.headers, reply.status))
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for RestEntityService<E> {
    async fn create(&self, entity: &E) -> SyncResult<E> {
        debug!("REST request to create {}", E::NAME);
        let copy = entity.to_wire();
        let reply = self
            .client
            .post::<E::Wire, _>(&self.resource_path, &copy)
            .await?;
        Ok(E::from_wire(reply.body))
    }

    async fn update(&self, entity: &E) -> SyncResult<E> {
        let id = entity.id().ok_or_else(|| SyncError::missing_id(E::NAME))?;
        debug!("REST request to update {} : {}", E::NAME, id);
        let copy = entity.to_wire();
        let reply = self
            .client
            .put::<E::Wire, _>(&self.resource_path, &copy)
            .await?;
        Ok(E::from_wire(reply.body))
    }

    async fn find(&self, id: EntityId) -> SyncResult<E> {
        debug!("REST request to get {} : {}", E::NAME, id);
        match self
            .client
            .get::<E::Wire>(&self.item_path(id), &[])
            .await
        {
            Ok(reply) => Ok(E::from_wire(reply.body)),
            Err(err) if err.status() == Some(404) => Err(SyncError::not_found(E::NAME, id)),
            Err(err) => Err(err),
        }
    }

    async fn query(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>> {
        debug!("REST request to get all {} with {:?}", E::NAME, options);
        self.list(&self.resource_path, options).await
    }

    async fn search(&self, options: &RequestOptions) -> SyncResult<ResponseWrapper<E>> {
        debug!(
            "REST request to search {} for query {:?}",
            E::NAME,
            options.query
        );
        self.list(&self.search_path, options).await
    }

    async fn delete(&self, id: EntityId) -> SyncResult<()> {
        debug!("REST request to delete {} : {}", E::NAME, id);
        self.client.delete(&self.item_path(id)).await?;
        Ok(())
    }
}
