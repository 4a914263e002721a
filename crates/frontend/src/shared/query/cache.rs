//! Keyed query cache.
//!
//! Pure state, no I/O: the client asks [`QueryCache::begin_fetch`] whether to
//! go to the network, sends the request itself and reports the outcome with
//! [`QueryCache::complete`]. Keeping the bookkeeping here makes the
//! dedup/ordering rules testable without a browser.

use super::key::{Invalidation, QueryKey};
use crate::shared::api_utils::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

pub type RequestId = u64;

/// Proof that the caller owns the current request for `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub request_id: RequestId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// Send the request and report back with this ticket
    Start(FetchTicket),
    /// A request for the key is already running; its result is shared
    Join,
    /// Cached value is fresh, nothing to do
    Fresh,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheEntry {
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub stale: bool,
    pub in_flight: Option<RequestId>,
    pub observers: usize,
}

/// What a component sees for one key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
    pub data: Option<Value>,
    /// No data yet and a request is running
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ApiError>,
}

impl QuerySnapshot {
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.data.as_ref()?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("cached payload does not match expected shape: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    next_request_id: RequestId,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decide whether `key` needs a network request. Creates the entry on
    /// first read. At most one request per key is in flight at a time.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> FetchDecision {
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.in_flight.is_some() {
            return FetchDecision::Join;
        }
        if entry.data.is_some() && !entry.stale && entry.error.is_none() {
            return FetchDecision::Fresh;
        }
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        entry.in_flight = Some(request_id);
        log::debug!("fetch {} (#{})", key, request_id);
        FetchDecision::Start(FetchTicket {
            key: key.clone(),
            request_id,
        })
    }

    /// Apply a finished request. Returns `false` when the ticket was
    /// superseded (the key was invalidated while the request ran) and the
    /// result was dropped. A failure keeps the previously cached value.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Value, ApiError>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if entry.in_flight != Some(ticket.request_id) {
            log::warn!(
                "discarding superseded response for {} (#{})",
                ticket.key,
                ticket.request_id
            );
            return false;
        }
        entry.in_flight = None;
        match result {
            Ok(value) => {
                entry.data = Some(value);
                entry.error = None;
                entry.stale = false;
            }
            Err(err) => {
                entry.error = Some(err);
            }
        }
        true
    }

    /// Mark every matching entry stale and supersede its running request.
    /// Returns the matching keys that currently have observers; those must be
    /// refetched right away, the rest refetch on their next read.
    pub fn invalidate(&mut self, invalidation: &Invalidation) -> Vec<QueryKey> {
        let mut active = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if !invalidation.matches(key) {
                continue;
            }
            entry.stale = true;
            entry.in_flight = None;
            if entry.observers > 0 {
                active.push(key.clone());
            }
        }
        log::debug!("invalidate {:?}: {} active key(s)", invalidation, active.len());
        active
    }

    /// Apply every invalidation of one mutation. Returns the observed keys to
    /// refetch, each once, in first-seen order.
    pub fn invalidate_all(&mut self, invalidations: &[Invalidation]) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = Vec::new();
        for inv in invalidations {
            for key in self.invalidate(inv) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    pub fn observe(&mut self, key: &QueryKey) {
        self.entries.entry(key.clone()).or_default().observers += 1;
    }

    pub fn unobserve(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.observers = entry.observers.saturating_sub(1);
        }
    }

    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        match self.entries.get(key) {
            Some(entry) => QuerySnapshot {
                data: entry.data.clone(),
                is_loading: entry.data.is_none() && entry.in_flight.is_some(),
                is_fetching: entry.in_flight.is_some(),
                error: entry.error.clone(),
            },
            None => QuerySnapshot::default(),
        }
    }

    /// Snapshot for whatever key a consumer currently has active. A disabled
    /// query (`None`) shows nothing, and responses for keys the consumer has
    /// moved away from never reach it.
    pub fn view(&self, active: Option<&QueryKey>) -> QuerySnapshot {
        active.map(|key| self.snapshot(key)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::key::Resource;
    use contracts::domain::a001_metric::aggregate::MetricListFilters;
    use serde_json::json;

    fn list_key(keyword: &str) -> QueryKey {
        QueryKey::MetricList(MetricListFilters::normalized(keyword, "all", "all"))
    }

    fn start(cache: &mut QueryCache, key: &QueryKey) -> FetchTicket {
        match cache.begin_fetch(key) {
            FetchDecision::Start(ticket) => ticket,
            other => panic!("expected Start for {}, got {:?}", key, other),
        }
    }

    #[test]
    fn test_first_read_starts_and_concurrent_reads_join() {
        let mut cache = QueryCache::new();
        let key = QueryKey::Calibers;
        let ticket = start(&mut cache, &key);
        assert_eq!(cache.begin_fetch(&key), FetchDecision::Join);
        assert!(cache.snapshot(&key).is_loading);

        assert!(cache.complete(&ticket, Ok(json!([]))));
        assert_eq!(cache.begin_fetch(&key), FetchDecision::Fresh);
        let snap = cache.snapshot(&key);
        assert!(!snap.is_loading);
        assert_eq!(snap.data, Some(json!([])));
    }

    #[test]
    fn test_field_equal_filters_share_one_request() {
        let mut cache = QueryCache::new();
        let a = QueryKey::MetricList(MetricListFilters {
            keyword: Some("gmv".into()),
            subject_area: None,
            sensitivity: None,
        });
        let b = list_key("gmv");
        let _ticket = start(&mut cache, &a);
        assert_eq!(cache.begin_fetch(&b), FetchDecision::Join);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut cache = QueryCache::new();
        let key = QueryKey::MetricDetail(7);
        let t1 = start(&mut cache, &key);
        cache.complete(&t1, Ok(json!({"id": 7})));

        cache.invalidate(&Invalidation::Key(key.clone()));
        let t2 = start(&mut cache, &key);
        let err = ApiError::Status { status: 500, body: "boom".into() };
        assert!(cache.complete(&t2, Err(err.clone())));

        let snap = cache.snapshot(&key);
        assert_eq!(snap.data, Some(json!({"id": 7})));
        assert_eq!(snap.error, Some(err));
        assert!(!snap.is_fetching);
    }

    #[test]
    fn test_error_without_data_is_refetched_on_next_read_only() {
        let mut cache = QueryCache::new();
        let key = QueryKey::MetricDetail(404);
        let t = start(&mut cache, &key);
        cache.complete(&t, Err(ApiError::Status { status: 404, body: String::new() }));
        let snap = cache.snapshot(&key);
        assert!(snap.error.as_ref().is_some_and(|e| e.is_not_found()));
        assert!(!snap.is_loading);
        // no automatic retry: only an explicit read starts a new request
        assert!(matches!(cache.begin_fetch(&key), FetchDecision::Start(_)));
    }

    #[test]
    fn test_invalidation_supersedes_running_request() {
        let mut cache = QueryCache::new();
        let key = QueryKey::MetricVersions(7);
        cache.observe(&key);
        let old = start(&mut cache, &key);

        let active = cache.invalidate(&Invalidation::Key(key.clone()));
        assert_eq!(active, vec![key.clone()]);
        let new = start(&mut cache, &key);

        assert!(cache.complete(&new, Ok(json!(["fresh"]))));
        assert!(!cache.complete(&old, Ok(json!(["old"]))));
        assert_eq!(cache.snapshot(&key).data, Some(json!(["fresh"])));
    }

    #[test]
    fn test_invalidate_reports_only_observed_keys() {
        let mut cache = QueryCache::new();
        let seen = list_key("a");
        let unseen = list_key("b");
        for key in [&seen, &unseen] {
            let t = start(&mut cache, key);
            cache.complete(&t, Ok(json!([])));
        }
        cache.observe(&seen);

        let active = cache.invalidate(&Invalidation::Resource(Resource::MetricList));
        assert_eq!(active, vec![seen.clone()]);
        // both are stale, the unobserved one refetches when read again
        assert!(cache.entry(&unseen).is_some_and(|e| e.stale));
        assert!(matches!(cache.begin_fetch(&unseen), FetchDecision::Start(_)));

        cache.unobserve(&seen);
        cache.unobserve(&seen);
        assert_eq!(cache.entry(&seen).map(|e| e.observers), Some(0));
    }

    #[test]
    fn test_invalidate_all_dedups_overlapping_rules() {
        let mut cache = QueryCache::new();
        let detail = QueryKey::MetricDetail(7);
        let list = list_key("");
        let idle = QueryKey::MetricVersions(7);
        for key in [&detail, &list, &idle] {
            let t = start(&mut cache, key);
            cache.complete(&t, Ok(json!({})));
        }
        cache.observe(&detail);
        cache.observe(&list);

        let active = cache.invalidate_all(&[
            Invalidation::Key(detail.clone()),
            Invalidation::Resource(Resource::MetricList),
            Invalidation::Key(detail.clone()),
            Invalidation::Key(idle.clone()),
        ]);
        assert_eq!(active, vec![detail.clone(), list.clone()]);
        assert!(cache.entry(&idle).is_some_and(|e| e.stale));
        assert!(cache.invalidate_all(&[]).is_empty());
    }

    #[test]
    fn test_late_response_for_superseded_filter_is_not_displayed() {
        let mut cache = QueryCache::new();
        let a = list_key("a");
        let b = list_key("b");

        let ta = start(&mut cache, &a);
        // filter edited before "a" answered
        let tb = start(&mut cache, &b);
        cache.complete(&tb, Ok(json!([{"code": "B"}])));
        cache.complete(&ta, Ok(json!([{"code": "A"}])));

        let shown = cache.view(Some(&b));
        assert_eq!(shown.data, Some(json!([{"code": "B"}])));
        assert_eq!(cache.view(None), QuerySnapshot::default());
    }

    #[test]
    fn test_snapshot_decode() {
        let snap = QuerySnapshot {
            data: Some(json!({"total_metrics": 3, "sensitive_metrics": 1, "active_versions": 2, "draft_versions": 1})),
            ..Default::default()
        };
        let summary: Option<contracts::domain::a001_metric::aggregate::MetricSummary> = snap.decode();
        assert_eq!(summary.map(|s| s.total_metrics), Some(3));

        let wrong: Option<Vec<i64>> = snap.decode();
        assert!(wrong.is_none());
    }
}
