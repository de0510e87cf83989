//! Strata core: versioned JSON-document persistence.
//!
//! Holds the domain model ([`dto`], [`entity`]), the payload [`codec`], the
//! [`mapper`] between API-facing DTOs and stored entities, the [`store`] port
//! with an in-memory implementation, and the [`service`] that drives the
//! multi-version lifecycle on top of them.

pub mod codec;
pub mod dto;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod memory_store;
pub mod observer;
pub mod product;
pub mod service;
pub mod store;
pub mod types;

pub use dto::{OperationType, Payload, VersionMeta, Versioned};
pub use entity::{NewEntity, StoredEntity};
pub use error::CoreError;
pub use mapper::JsonEntityMapper;
pub use memory_store::MemoryStore;
pub use observer::SaveObserver;
pub use product::{Product, ProductDto};
pub use service::VersionedService;
pub use store::{ObjectStore, StoreError};
