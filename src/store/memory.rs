// In memory implementation of the store port.
//
// Purpose
// - Exercise the GraphQL layer and the HTTP composition without a database.
//
// Responsibilities
// - Keep rows in a vector behind an async lock and mimic the Mongo adapter's
//   observable behavior: hex ids, last-name ordering, case-insensitive search.

use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::store::{NewProgrammer, Programmer, ProgrammerStore, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<Programmer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_term(programmer: &Programmer, term: &str) -> bool {
    let term = term.to_lowercase();
    programmer.first_name.to_lowercase().contains(&term)
        || programmer.last_name.to_lowercase().contains(&term)
        || programmer.title.to_lowercase().contains(&term)
        || programmer
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
}

#[async_trait::async_trait]
impl ProgrammerStore for InMemoryStore {
    async fn list(&self, query: Option<&str>) -> Result<Vec<Programmer>, StoreError> {
        let rows = self.rows.read().await;
        let mut listed: Vec<Programmer> = match query {
            Some(term) if !term.trim().is_empty() => rows
                .iter()
                .filter(|programmer| matches_term(programmer, term))
                .cloned()
                .collect(),
            _ => rows.clone(),
        };
        listed.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(listed)
    }

    async fn get(&self, id: &str) -> Result<Option<Programmer>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|programmer| programmer.id == id).cloned())
    }

    async fn add(&self, new: NewProgrammer) -> Result<Programmer, StoreError> {
        let programmer = Programmer {
            id: ObjectId::new().to_hex(),
            first_name: new.first_name,
            last_name: new.last_name,
            title: new.title,
            picture: new.picture,
            tags: new.tags,
        };
        self.rows.write().await.push(programmer.clone());
        Ok(programmer)
    }
}
