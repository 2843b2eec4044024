// The store port: what the resolvers need from the database, as a trait.
//
// Purpose
// - Keep the GraphQL layer independent of the concrete driver by coding
//   against a narrow interface.
//
// Boundaries
// - No driver types leak through the trait. Adapters live in the submodules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod memory;
pub mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),

    #[error("malformed programmer id: {0}")]
    MalformedId(String),
}

/// A programmer profile as the rest of the crate sees it. Ids are hex-encoded
/// document ids regardless of the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programmer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub picture: Option<String>,
    pub tags: Vec<String>,
}

/// Input for [`ProgrammerStore::add`]; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProgrammer {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub picture: Option<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait ProgrammerStore: Send + Sync {
    /// List programmers, optionally narrowed by a free-text term matched
    /// case-insensitively against names, title, and tags.
    async fn list(&self, query: Option<&str>) -> Result<Vec<Programmer>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Programmer>, StoreError>;

    async fn add(&self, new: NewProgrammer) -> Result<Programmer, StoreError>;
}
