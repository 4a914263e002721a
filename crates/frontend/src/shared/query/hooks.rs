use super::cache::QuerySnapshot;
use super::client::use_query_client;
use super::key::QueryKey;
use crate::shared::api_utils::ApiError;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Reactive view of one cached query.
pub struct QueryResult<T: Send + Sync + 'static> {
    pub data: Signal<Option<T>>,
    pub is_loading: Signal<bool>,
    pub error: Signal<Option<ApiError>>,
}

impl<T: Send + Sync + 'static> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryResult<T> {}

/// Subscribe to the key produced by `key_fn`.
///
/// `None` disables the query. When the key changes the old one is released
/// and only the new key's state is shown, so a slow answer for a previous
/// filter never replaces the current one.
pub fn use_query<T, F>(key_fn: F) -> QueryResult<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
    F: Fn() -> Option<QueryKey> + Send + Sync + 'static,
{
    let client = use_query_client();
    let key_fn = Arc::new(key_fn);
    let observed = StoredValue::new(None::<QueryKey>);

    {
        let key_fn = key_fn.clone();
        Effect::new(move |_| {
            let current = key_fn();
            let Some((released, acquired)) =
                observed.try_update_value(|slot| swap_observed(slot, current))
            else {
                return;
            };
            if let Some(old) = released {
                client.unobserve(&old);
            }
            if let Some(key) = acquired {
                client.observe(&key);
                client.fetch(key);
            }
        });
    }

    on_cleanup(move || {
        if let Some(Some(key)) = observed.try_update_value(|slot| slot.take()) {
            client.unobserve(&key);
        }
    });

    let cache = client.cache();
    let snapshot: Memo<QuerySnapshot> = Memo::new(move |_| {
        let key = key_fn();
        cache.with(|c| c.view(key.as_ref()))
    });

    QueryResult {
        data: Signal::derive(move || snapshot.with(|s| s.decode::<T>())),
        is_loading: Signal::derive(move || snapshot.with(|s| s.is_loading)),
        error: Signal::derive(move || snapshot.with(|s| s.error.clone())),
    }
}

/// Move the observed slot to `next`. Returns the key to release and the key
/// to acquire; both are `None` when the key did not change.
fn swap_observed(
    slot: &mut Option<QueryKey>,
    next: Option<QueryKey>,
) -> (Option<QueryKey>, Option<QueryKey>) {
    if *slot == next {
        return (None, None);
    }
    let released = slot.take();
    *slot = next.clone();
    (released, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_observed_tracks_key_changes() {
        let mut slot = None;
        assert_eq!(swap_observed(&mut slot, None), (None, None));

        let first = QueryKey::MetricDetail(1);
        let second = QueryKey::MetricDetail(2);
        assert_eq!(swap_observed(&mut slot, Some(first.clone())), (None, Some(first.clone())));
        assert_eq!(swap_observed(&mut slot, Some(first.clone())), (None, None));
        assert_eq!(
            swap_observed(&mut slot, Some(second.clone())),
            (Some(first), Some(second.clone()))
        );
        assert_eq!(swap_observed(&mut slot, None), (Some(second), None));
        assert_eq!(slot, None);
    }
}
