// MongoDB adapter for the store port.
//
// Responsibilities
// - Establish the client from the profile-selected URI and verify it with a
//   ping, so an unreachable server fails at startup instead of on the first
//   request (the driver otherwise connects lazily).
// - Translate between the wire documents and the crate-level `Programmer`.

use std::time::Duration;

use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::store::{NewProgrammer, Programmer, ProgrammerStore, StoreError};

const DB_NAME: &str = "devroster";
const COLLECTION: &str = "programmers";

pub struct MongoStore {
    programmers: Collection<ProgrammerDoc>,
}

impl MongoStore {
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        Self::connect_with_uri(&config.mongo_uri(), None).await
    }

    /// Connect to an explicit URI. `server_selection_timeout` caps how long
    /// the ping waits for a reachable server; `None` keeps the driver
    /// default.
    pub async fn connect_with_uri(
        uri: &str,
        server_selection_timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = server_selection_timeout;
        let client = Client::with_options(options)?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(Self {
            programmers: client.database(DB_NAME).collection(COLLECTION),
        })
    }
}

/// Wire shape of a programmer document. Field names stay camelCase to match
/// what the web app already stores.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgrammerDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    first_name: String,
    last_name: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<ProgrammerDoc> for Programmer {
    fn from(doc: ProgrammerDoc) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            first_name: doc.first_name,
            last_name: doc.last_name,
            title: doc.title,
            picture: doc.picture,
            tags: doc.tags,
        }
    }
}

/// Escape regex metacharacters so a search term matches literally, like the
/// in-memory store's substring match.
fn escape_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '\\' | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn search_filter(query: Option<&str>) -> Document {
    match query {
        Some(term) if !term.trim().is_empty() => {
            let matches = doc! { "$regex": escape_term(term), "$options": "i" };
            doc! {
                "$or": [
                    { "firstName": matches.clone() },
                    { "lastName": matches.clone() },
                    { "title": matches.clone() },
                    { "tags": matches },
                ]
            }
        }
        _ => doc! {},
    }
}

#[async_trait::async_trait]
impl ProgrammerStore for MongoStore {
    async fn list(&self, query: Option<&str>) -> Result<Vec<Programmer>, StoreError> {
        let docs: Vec<ProgrammerDoc> = self
            .programmers
            .find(search_filter(query))
            .sort(doc! { "lastName": 1, "firstName": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Programmer>, StoreError> {
        let oid =
            ObjectId::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))?;
        let found = self.programmers.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Into::into))
    }

    async fn add(&self, new: NewProgrammer) -> Result<Programmer, StoreError> {
        let doc = ProgrammerDoc {
            id: None,
            first_name: new.first_name,
            last_name: new.last_name,
            title: new.title,
            picture: new.picture,
            tags: new.tags,
        };
        let inserted = self.programmers.insert_one(&doc).await?;
        let id = inserted
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_default();
        Ok(Programmer {
            id,
            first_name: doc.first_name,
            last_name: doc.last_name,
            title: doc.title,
            picture: doc.picture,
            tags: doc.tags,
        })
    }
}

#[cfg(test)]
mod search_filter_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn it_should_match_everything_without_a_term(#[case] query: Option<&str>) {
        assert_eq!(search_filter(query), doc! {});
    }

    #[rstest]
    fn it_should_search_names_title_and_tags_case_insensitively() {
        let filter = search_filter(Some("rust"));
        let branches = filter.get_array("$or").unwrap();
        assert_eq!(branches.len(), 4);
        let first = branches[0].as_document().unwrap();
        let matches = first.get_document("firstName").unwrap();
        assert_eq!(matches.get_str("$regex").unwrap(), "rust");
        assert_eq!(matches.get_str("$options").unwrap(), "i");
    }

    #[rstest]
    #[case("c++", "c\\+\\+")]
    #[case("node.js", "node\\.js")]
    #[case("(go)", "\\(go\\)")]
    #[case("a\\b", "a\\\\b")]
    fn it_should_match_search_terms_literally(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(escape_term(term), expected);

        let filter = search_filter(Some(term));
        let first = filter.get_array("$or").unwrap()[0].as_document().unwrap();
        let matches = first.get_document("firstName").unwrap();
        assert_eq!(matches.get_str("$regex").unwrap(), expected);
    }
}
