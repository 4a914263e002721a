//! Query cache and mutation table driven against an in-memory backend.

use contracts::domain::a001_metric::aggregate::{
    Metric, MetricCreateDto, MetricListFilters, MetricSummary, MetricVersion,
    MetricVersionCreateDto,
};
use contracts::domain::a002_caliber::aggregate::{
    Caliber, VersionCaliber, VersionCaliberCreateDto, VersionCaliberUpdateDto,
};
use frontend::shared::api_utils::{ApiError, ApiRequest, HttpMethod};
use frontend::shared::query::cache::{FetchDecision, FetchTicket};
use frontend::shared::query::{Mutation, QueryCache, QueryKey};
use serde_json::{json, Value};

const TS: &str = "2024-01-01T00:00:00";

#[derive(Default)]
struct FakeBackend {
    metrics: Vec<Metric>,
    calibers: Vec<Caliber>,
    next_id: i64,
    fail_writes: bool,
    requests: Vec<(HttpMethod, String)>,
}

fn not_found(path: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("no route {}", path),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn from_body<T: serde::de::DeserializeOwned>(body: &Option<Value>) -> Result<T, ApiError> {
    serde_json::from_value(body.clone().unwrap_or(Value::Null))
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}

impl FakeBackend {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_caliber(&mut self, code: &str, name: &str) -> i64 {
        let id = self.id();
        self.calibers.push(Caliber {
            id,
            code: code.to_string(),
            name: name.to_string(),
            category: "filter".to_string(),
            expr_dsl: None,
            expr_sql: None,
            value_format: None,
            unit_override: None,
            notes: None,
            created_at: TS.to_string(),
        });
        id
    }

    fn summary(&self) -> MetricSummary {
        let versions = self.metrics.iter().flat_map(|m| m.versions.iter());
        let (active, draft) = versions.fold((0, 0), |(a, d), v| match v.status.as_str() {
            "active" => (a + 1, d),
            "draft" => (a, d + 1),
            _ => (a, d),
        });
        MetricSummary {
            total_metrics: self.metrics.len() as i64,
            sensitive_metrics: self.metrics.iter().filter(|m| m.is_sensitive()).count() as i64,
            active_versions: active,
            draft_versions: draft,
        }
    }

    fn version_mut(&mut self, metric_id: i64, version_id: i64) -> Option<&mut MetricVersion> {
        self.metrics
            .iter_mut()
            .find(|m| m.id == metric_id)?
            .versions
            .iter_mut()
            .find(|v| v.id == version_id)
    }

    fn handle(&mut self, req: &ApiRequest) -> Result<Value, ApiError> {
        self.requests.push((req.method, req.path.clone()));
        if self.fail_writes && req.method != HttpMethod::Get {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        let segments: Vec<&str> = req.path.split('/').collect();
        match (req.method, segments.as_slice()) {
            (HttpMethod::Get, ["metrics"]) => {
                let keyword = req
                    .query
                    .as_deref()
                    .and_then(|q| q.strip_prefix("keyword="))
                    .map(str::to_lowercase);
                let rows: Vec<&Metric> = self
                    .metrics
                    .iter()
                    .filter(|m| match &keyword {
                        Some(k) => m.code.to_lowercase().contains(k) || m.name.to_lowercase().contains(k),
                        None => true,
                    })
                    .collect();
                to_value(&rows)
            }
            (HttpMethod::Get, ["metrics", "summary"]) => to_value(&self.summary()),
            (HttpMethod::Post, ["metrics"]) => {
                let dto: MetricCreateDto = from_body(&req.body)?;
                let metric_id = self.id();
                let version_id = self.id();
                let v = dto.initial_version;
                let metric = Metric {
                    id: metric_id,
                    code: dto.code,
                    name: dto.name,
                    metric_type: dto.metric_type,
                    unit: dto.unit,
                    subject_area: dto.subject_area,
                    owner: dto.owner,
                    sensitivity: dto.sensitivity,
                    description: dto.description,
                    created_by: None,
                    updated_by: None,
                    created_at: TS.to_string(),
                    updated_at: TS.to_string(),
                    versions: vec![MetricVersion {
                        id: version_id,
                        metric_id,
                        version: v.version,
                        status: v.status,
                        formula_sql: v.formula_sql,
                        formula_dsl: v.formula_dsl,
                        grain: Some(v.grain),
                        data_sources: v.data_sources,
                        notes: v.notes,
                        effective_from: Some(v.effective_from),
                        effective_to: v.effective_to,
                        subject_area: None,
                        created_at: TS.to_string(),
                        calibers: Vec::new(),
                    }],
                };
                let value = to_value(&metric)?;
                self.metrics.push(metric);
                Ok(value)
            }
            (HttpMethod::Get, ["metrics", id]) => {
                let id: i64 = id.parse().map_err(|_| not_found(&req.path))?;
                let metric = self.metrics.iter().find(|m| m.id == id).ok_or_else(|| not_found(&req.path))?;
                to_value(metric)
            }
            (HttpMethod::Delete, ["metrics", id]) => {
                let id: i64 = id.parse().map_err(|_| not_found(&req.path))?;
                let before = self.metrics.len();
                self.metrics.retain(|m| m.id != id);
                if self.metrics.len() == before {
                    return Err(not_found(&req.path));
                }
                Ok(Value::Null)
            }
            (HttpMethod::Get, ["metrics", m, "versions", v, "calibers"]) => {
                let (m, v) = (parse(m)?, parse(v)?);
                let version = self.version_mut(m, v).ok_or_else(|| not_found(&req.path))?;
                let mut rows = version.calibers.clone();
                rows.sort_by_key(|b| (b.order_index, b.id));
                to_value(&rows)
            }
            (HttpMethod::Post, ["metrics", m, "versions", v, "calibers"]) => {
                let (m, v) = (parse(m)?, parse(v)?);
                let dto: VersionCaliberCreateDto = from_body(&req.body)?;
                let id = self.id();
                let caliber = self.calibers.iter().find(|c| c.id == dto.caliber_id).cloned();
                let binding = VersionCaliber {
                    id,
                    metric_version_id: v,
                    caliber_id: dto.caliber_id,
                    status: dto.status,
                    order_index: dto.order_index,
                    override_expr_sql: dto.override_expr_sql,
                    override_expr_dsl: dto.override_expr_dsl,
                    override_data_sources: dto.override_data_sources,
                    notes: dto.notes,
                    created_at: TS.to_string(),
                    caliber,
                };
                let value = to_value(&binding)?;
                self.version_mut(m, v)
                    .ok_or_else(|| not_found(&req.path))?
                    .calibers
                    .push(binding);
                Ok(value)
            }
            (HttpMethod::Patch, ["metrics", m, "versions", v, "calibers", b]) => {
                let (m, v, b) = (parse(m)?, parse(v)?, parse(b)?);
                let dto: VersionCaliberUpdateDto = from_body(&req.body)?;
                let path = req.path.clone();
                let version = self.version_mut(m, v).ok_or_else(|| not_found(&path))?;
                let binding = version
                    .calibers
                    .iter_mut()
                    .find(|x| x.id == b)
                    .ok_or_else(|| not_found(&path))?;
                if let Some(order) = dto.order_index {
                    binding.order_index = order;
                }
                if let Some(status) = dto.status {
                    binding.status = status;
                }
                if dto.notes.is_some() {
                    binding.notes = dto.notes;
                }
                to_value(binding)
            }
            _ => Err(not_found(&req.path)),
        }
    }
}

fn parse(segment: &str) -> Result<i64, ApiError> {
    segment.parse().map_err(|_| not_found(segment))
}

/// Synchronous stand-in for `QueryClient`: same cache calls, no spawning.
struct Harness {
    cache: QueryCache,
    backend: FakeBackend,
}

impl Harness {
    fn new() -> Self {
        Self {
            cache: QueryCache::new(),
            backend: FakeBackend::default(),
        }
    }

    fn mount(&mut self, key: &QueryKey) {
        self.cache.observe(key);
        self.load(key);
    }

    fn load(&mut self, key: &QueryKey) {
        if let FetchDecision::Start(ticket) = self.cache.begin_fetch(key) {
            let result = self.backend.handle(&ticket.key.request());
            self.cache.complete(&ticket, result);
        }
    }

    fn start(&mut self, key: &QueryKey) -> FetchTicket {
        match self.cache.begin_fetch(key) {
            FetchDecision::Start(ticket) => ticket,
            other => panic!("expected a new request for {}, got {:?}", key, other),
        }
    }

    fn mutate(&mut self, mutation: Mutation, body: Option<Value>) -> Result<Value, ApiError> {
        let value = self.backend.handle(&mutation.request(body))?;
        for key in self.cache.invalidate_all(&mutation.invalidations()) {
            self.load(&key);
        }
        Ok(value)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.cache.snapshot(key).decode()
    }
}

fn all_metrics() -> QueryKey {
    QueryKey::MetricList(MetricListFilters::default())
}

fn gmv_body() -> Value {
    json!({
        "code": "M_GMV",
        "name": "GMV",
        "type": "finance",
        "sensitivity": "normal",
        "initial_version": {
            "version": "v1",
            "status": "draft",
            "grain": ["company", "product"],
            "effective_from": "2024-01-01",
            "effective_to": "2024-12-31"
        }
    })
}

#[test]
fn test_create_metric_shows_up_in_list() {
    let mut h = Harness::new();
    let list = all_metrics();
    h.mount(&list);
    h.mount(&QueryKey::MetricSummary);
    assert_eq!(h.read::<Vec<Metric>>(&list), Some(vec![]));

    let created = h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();
    assert_eq!(created["code"], "M_GMV");

    let metrics: Vec<Metric> = h.read(&list).unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].code, "M_GMV");
    assert_eq!(metrics[0].versions.len(), 1);
    assert_eq!(metrics[0].versions[0].version.as_deref(), Some("v1"));
    assert_eq!(metrics[0].versions[0].status, "draft");
    assert_eq!(metrics[0].current_version_label(), "v1 · draft");

    let summary: MetricSummary = h.read(&QueryKey::MetricSummary).unwrap();
    assert_eq!(summary.total_metrics, 1);
    assert_eq!(summary.draft_versions, 1);
}

#[test]
fn test_delete_metric_updates_list_and_summary() {
    let mut h = Harness::new();
    h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();
    let mut second = gmv_body();
    second["code"] = json!("M_UV");
    h.mutate(Mutation::CreateMetric, Some(second)).unwrap();

    let list = all_metrics();
    h.mount(&list);
    h.mount(&QueryKey::MetricSummary);
    let before: MetricSummary = h.read(&QueryKey::MetricSummary).unwrap();
    let gmv_id = h.read::<Vec<Metric>>(&list).unwrap()[0].id;

    h.mutate(Mutation::DeleteMetric { id: gmv_id }, None).unwrap();

    let metrics: Vec<Metric> = h.read(&list).unwrap();
    assert!(metrics.iter().all(|m| m.id != gmv_id));
    let after: MetricSummary = h.read(&QueryKey::MetricSummary).unwrap();
    assert_eq!(after.total_metrics, before.total_metrics - 1);
}

#[test]
fn test_reorder_binding_keeps_identity() {
    let mut h = Harness::new();
    let caliber_id = h.backend.add_caliber("CALC_ORDER_FILTER", "Valid orders");
    let metric: Metric = serde_json::from_value(h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap()).unwrap();
    let (metric_id, version_id) = (metric.id, metric.versions[0].id);

    let bindings = QueryKey::VersionCalibers {
        metric_id,
        version_id,
    };
    let detail = QueryKey::MetricDetail(metric_id);
    h.mount(&bindings);
    h.mount(&detail);
    assert_eq!(h.read::<Vec<VersionCaliber>>(&bindings), Some(vec![]));

    let body = serde_json::to_value(VersionCaliberCreateDto::new(caliber_id, 0)).unwrap();
    h.mutate(
        Mutation::CreateBinding {
            metric_id,
            version_id,
        },
        Some(body),
    )
    .unwrap();
    let rows: Vec<VersionCaliber> = h.read(&bindings).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].caliber_label(), "CALC_ORDER_FILTER · Valid orders");
    assert_eq!(rows[0].order_index, 0);
    let binding_id = rows[0].id;
    // the detail payload embeds bindings and was refreshed as well
    let shown: Metric = h.read(&detail).unwrap();
    assert_eq!(shown.versions[0].calibers.len(), 1);

    let patch = VersionCaliberUpdateDto {
        order_index: Some(1),
        ..Default::default()
    };
    h.mutate(
        Mutation::UpdateBinding {
            metric_id,
            version_id,
            binding_id,
        },
        Some(serde_json::to_value(patch).unwrap()),
    )
    .unwrap();

    let rows: Vec<VersionCaliber> = h.read(&bindings).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, binding_id);
    assert_eq!(rows[0].order_index, 1);
}

#[test]
fn test_failed_write_leaves_cache_untouched() {
    let mut h = Harness::new();
    h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();
    let list = all_metrics();
    h.mount(&list);
    let id = h.read::<Vec<Metric>>(&list).unwrap()[0].id;
    let requests_before = h.backend.requests.len();

    h.backend.fail_writes = true;
    let err = h.mutate(Mutation::DeleteMetric { id }, None).unwrap_err();
    assert_eq!(err.user_message(), "Request failed (HTTP 500)");

    // nothing went stale, nothing was refetched
    let entry = h.cache.entry(&list).unwrap();
    assert!(!entry.stale);
    assert_eq!(h.backend.requests.len(), requests_before + 1);
    assert_eq!(h.read::<Vec<Metric>>(&list).unwrap().len(), 1);
}

#[test]
fn test_concurrent_reads_share_one_request() {
    let mut h = Harness::new();
    let list = all_metrics();
    h.cache.observe(&list);
    h.cache.observe(&list);

    let ticket = h.start(&list);
    assert_eq!(h.cache.begin_fetch(&list), FetchDecision::Join);
    assert!(h.cache.snapshot(&list).is_loading);

    let result = h.backend.handle(&ticket.key.request());
    assert!(h.cache.complete(&ticket, result));
    assert_eq!(h.cache.begin_fetch(&list), FetchDecision::Fresh);
    assert_eq!(
        h.backend
            .requests
            .iter()
            .filter(|(m, p)| *m == HttpMethod::Get && p == "metrics")
            .count(),
        1
    );
}

#[test]
fn test_late_response_for_previous_filter_is_not_shown() {
    let mut h = Harness::new();
    h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();

    let old_key = QueryKey::MetricList(MetricListFilters::normalized("gmv", "all", "all"));
    let new_key = QueryKey::MetricList(MetricListFilters::normalized("uv", "all", "all"));

    // user types "gmv", then "uv" before the first response arrives
    h.cache.observe(&old_key);
    let old_ticket = h.start(&old_key);
    h.cache.unobserve(&old_key);
    h.cache.observe(&new_key);
    let new_ticket = h.start(&new_key);

    let new_result = h.backend.handle(&new_ticket.key.request());
    h.cache.complete(&new_ticket, new_result);
    let old_result = h.backend.handle(&old_ticket.key.request());
    h.cache.complete(&old_ticket, old_result);

    // the consumer only ever reads the key it currently has active
    let shown: Vec<Metric> = h.cache.view(Some(&new_key)).decode().unwrap();
    assert!(shown.is_empty());
}

#[test]
fn test_invalidated_request_result_is_discarded() {
    let mut h = Harness::new();
    h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();
    let list = all_metrics();
    h.cache.observe(&list);

    // a list request is running while a delete lands
    let early = h.start(&list);
    let early_result = h.backend.handle(&early.key.request());
    let id = h.backend.metrics[0].id;
    h.mutate(Mutation::DeleteMetric { id }, None).unwrap();

    // the refetch triggered by the delete already replaced the entry
    assert!(!h.cache.complete(&early, early_result));
    assert_eq!(h.read::<Vec<Metric>>(&list), Some(vec![]));
}

#[test]
fn test_unobserved_keys_refetch_on_next_read() {
    let mut h = Harness::new();
    h.mount(&QueryKey::MetricSummary);
    h.cache.unobserve(&QueryKey::MetricSummary);
    let gets_before = h.backend.requests.len();

    h.mutate(Mutation::CreateMetric, Some(gmv_body())).unwrap();
    // only the POST went out
    assert_eq!(h.backend.requests.len(), gets_before + 1);
    assert!(h.cache.entry(&QueryKey::MetricSummary).unwrap().stale);

    h.mount(&QueryKey::MetricSummary);
    let summary: MetricSummary = h.read(&QueryKey::MetricSummary).unwrap();
    assert_eq!(summary.total_metrics, 1);
}

#[test]
fn test_version_create_defaults_to_draft() {
    let dto = MetricVersionCreateDto::new(vec!["company".into()], chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["status"], "draft");
    assert!(json.get("effective_to").is_none());
}
