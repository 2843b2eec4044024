// GraphQL schema and resolvers over the store port.

use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, ID, InputObject, Object, Result as GqlResult, Schema, SimpleObject,
};

use crate::store::{NewProgrammer, Programmer, ProgrammerStore};

#[derive(SimpleObject, Clone)]
pub struct GqlProgrammer {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub picture: Option<String>,
    pub tags: Vec<String>,
}

impl From<Programmer> for GqlProgrammer {
    fn from(p: Programmer) -> Self {
        Self {
            id: ID(p.id),
            first_name: p.first_name,
            last_name: p.last_name,
            title: p.title,
            picture: p.picture,
            tags: p.tags,
        }
    }
}

#[derive(InputObject)]
pub struct NewProgrammerInput {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub picture: Option<String>,
    #[graphql(default)]
    pub tags: Vec<String>,
}

impl From<NewProgrammerInput> for NewProgrammer {
    fn from(input: NewProgrammerInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            title: input.title,
            picture: input.picture,
            tags: input.tags,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All programmers, optionally narrowed by a free-text search term.
    async fn programmers(
        &self,
        context: &Context<'_>,
        query: Option<String>,
    ) -> GqlResult<Vec<GqlProgrammer>> {
        let store = context.data_unchecked::<Arc<dyn ProgrammerStore>>();
        let listed = store.list(query.as_deref()).await?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    async fn programmer(
        &self,
        context: &Context<'_>,
        id: ID,
    ) -> GqlResult<Option<GqlProgrammer>> {
        let store = context.data_unchecked::<Arc<dyn ProgrammerStore>>();
        Ok(store.get(id.as_str()).await?.map(Into::into))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_programmer(
        &self,
        context: &Context<'_>,
        input: NewProgrammerInput,
    ) -> GqlResult<GqlProgrammer> {
        let store = context.data_unchecked::<Arc<dyn ProgrammerStore>>();
        Ok(store.add(input.into()).await?.into())
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Arc<dyn ProgrammerStore>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}
