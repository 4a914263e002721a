use super::cache::{FetchDecision, QueryCache};
use super::key::{Invalidation, QueryKey};
use super::mutation::Mutation;
use crate::shared::api_utils::{self, ApiError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Shared query cache, provided once at the app root.
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: RwSignal<QueryCache>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: RwSignal::new(QueryCache::new()),
        }
    }

    pub fn cache(&self) -> RwSignal<QueryCache> {
        self.cache
    }

    pub fn observe(&self, key: &QueryKey) {
        self.cache.update(|c| c.observe(key));
    }

    pub fn unobserve(&self, key: &QueryKey) {
        self.cache.update(|c| c.unobserve(key));
    }

    /// Load `key` unless it is fresh or already being loaded.
    pub fn fetch(&self, key: QueryKey) {
        let decision = self.cache.try_update(|c| c.begin_fetch(&key));
        let Some(FetchDecision::Start(ticket)) = decision else {
            return;
        };
        let cache = self.cache;
        spawn_local(async move {
            let result = api_utils::send(&ticket.key.request()).await;
            if let Err(e) = &result {
                log::error!("query {} failed: {}", ticket.key, e);
            }
            cache.update(|c| {
                c.complete(&ticket, result);
            });
        });
    }

    /// Mark keys stale and reload the ones somebody is looking at.
    pub fn invalidate(&self, invalidations: &[Invalidation]) {
        let active = self
            .cache
            .try_update(|c| c.invalidate_all(invalidations))
            .unwrap_or_default();
        for key in active {
            self.fetch(key);
        }
    }

    /// Run a write with a JSON body
    pub async fn mutate_with<B, T>(&self, mutation: Mutation, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        self.run(mutation, Some(body)).await
    }

    /// Run a write without a body (delete, publish)
    pub async fn mutate<T: DeserializeOwned>(&self, mutation: Mutation) -> Result<T, ApiError> {
        self.run(mutation, None).await
    }

    async fn run<T: DeserializeOwned>(
        &self,
        mutation: Mutation,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let value = match api_utils::send(&mutation.request(body)).await {
            Ok(v) => v,
            Err(e) => {
                log::error!("{:?} failed: {}", mutation, e);
                return Err(e);
            }
        };
        // server confirmed the write, stale keys go regardless of decoding
        self.invalidate(&mutation.invalidations());
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient not found in context")
}
