//! Write operations and the cache keys each one makes stale.

use super::key::{Invalidation, QueryKey, Resource};
use crate::shared::api_utils::{ApiRequest, HttpMethod};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateMetric,
    UpdateMetric { id: i64 },
    DeleteMetric { id: i64 },
    RequestPublish { id: i64 },
    CreateVersion { metric_id: i64 },
    UpdateVersion { metric_id: i64, version_id: i64 },
    DeleteVersion { metric_id: i64, version_id: i64 },
    CreateCaliber,
    UpdateCaliber { id: i64 },
    DeleteCaliber { id: i64 },
    CreateBinding { metric_id: i64, version_id: i64 },
    UpdateBinding { metric_id: i64, version_id: i64, binding_id: i64 },
    DeleteBinding { metric_id: i64, version_id: i64, binding_id: i64 },
}

fn bindings_path(metric_id: i64, version_id: i64) -> String {
    format!("metrics/{}/versions/{}/calibers", metric_id, version_id)
}

impl Mutation {
    pub fn method(&self) -> HttpMethod {
        match self {
            Mutation::CreateMetric
            | Mutation::RequestPublish { .. }
            | Mutation::CreateVersion { .. }
            | Mutation::CreateCaliber
            | Mutation::CreateBinding { .. } => HttpMethod::Post,
            Mutation::UpdateMetric { .. }
            | Mutation::UpdateVersion { .. }
            | Mutation::UpdateCaliber { .. }
            | Mutation::UpdateBinding { .. } => HttpMethod::Patch,
            Mutation::DeleteMetric { .. }
            | Mutation::DeleteVersion { .. }
            | Mutation::DeleteCaliber { .. }
            | Mutation::DeleteBinding { .. } => HttpMethod::Delete,
        }
    }

    pub fn path(&self) -> String {
        match *self {
            Mutation::CreateMetric => "metrics".to_string(),
            Mutation::UpdateMetric { id } | Mutation::DeleteMetric { id } => {
                format!("metrics/{}", id)
            }
            Mutation::RequestPublish { id } => format!("metrics/{}/publish", id),
            Mutation::CreateVersion { metric_id } => format!("metrics/{}/versions", metric_id),
            Mutation::UpdateVersion {
                metric_id,
                version_id,
            }
            | Mutation::DeleteVersion {
                metric_id,
                version_id,
            } => format!("metrics/{}/versions/{}", metric_id, version_id),
            Mutation::CreateCaliber => "calibers".to_string(),
            Mutation::UpdateCaliber { id } | Mutation::DeleteCaliber { id } => {
                format!("calibers/{}", id)
            }
            Mutation::CreateBinding {
                metric_id,
                version_id,
            } => bindings_path(metric_id, version_id),
            Mutation::UpdateBinding {
                metric_id,
                version_id,
                binding_id,
            }
            | Mutation::DeleteBinding {
                metric_id,
                version_id,
                binding_id,
            } => format!("{}/{}", bindings_path(metric_id, version_id), binding_id),
        }
    }

    pub fn request(&self, body: Option<Value>) -> ApiRequest {
        ApiRequest::new(self.method(), self.path()).with_body(body)
    }

    /// Keys to mark stale once the server has confirmed the write
    pub fn invalidations(&self) -> Vec<Invalidation> {
        use Invalidation::{Key, Resource as All};
        match *self {
            Mutation::CreateMetric | Mutation::DeleteMetric { .. } => {
                vec![All(Resource::MetricList), All(Resource::MetricSummary)]
            }
            Mutation::UpdateMetric { id } => {
                vec![All(Resource::MetricList), Key(QueryKey::MetricDetail(id))]
            }
            Mutation::RequestPublish { id } => vec![
                Key(QueryKey::MetricDetail(id)),
                Key(QueryKey::MetricVersions(id)),
                All(Resource::MetricList),
                All(Resource::MetricSummary),
            ],
            Mutation::CreateVersion { metric_id } => vec![
                Key(QueryKey::MetricVersions(metric_id)),
                All(Resource::MetricList),
            ],
            Mutation::UpdateVersion { metric_id, .. } => vec![
                Key(QueryKey::MetricVersions(metric_id)),
                Key(QueryKey::MetricDetail(metric_id)),
            ],
            Mutation::DeleteVersion { metric_id, .. } => vec![
                Key(QueryKey::MetricVersions(metric_id)),
                Key(QueryKey::MetricDetail(metric_id)),
                All(Resource::MetricList),
                All(Resource::MetricSummary),
            ],
            Mutation::CreateCaliber
            | Mutation::UpdateCaliber { .. }
            | Mutation::DeleteCaliber { .. } => vec![All(Resource::Calibers)],
            Mutation::CreateBinding {
                metric_id,
                version_id,
            }
            | Mutation::UpdateBinding {
                metric_id,
                version_id,
                ..
            }
            | Mutation::DeleteBinding {
                metric_id,
                version_id,
                ..
            } => vec![
                Key(QueryKey::VersionCalibers {
                    metric_id,
                    version_id,
                }),
                Key(QueryKey::MetricDetail(metric_id)),
            ],
        }
    }

    /// True when `key` goes stale after this mutation succeeds
    pub fn invalidates(&self, key: &QueryKey) -> bool {
        self.invalidations().iter().any(|inv| inv.matches(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_metric::aggregate::MetricListFilters;

    fn any_list() -> QueryKey {
        QueryKey::MetricList(MetricListFilters::normalized("gmv", "trade", "all"))
    }

    #[test]
    fn test_metric_create_and_delete() {
        for m in [Mutation::CreateMetric, Mutation::DeleteMetric { id: 7 }] {
            assert!(m.invalidates(&any_list()));
            assert!(m.invalidates(&QueryKey::MetricList(MetricListFilters::default())));
            assert!(m.invalidates(&QueryKey::MetricSummary));
            assert!(!m.invalidates(&QueryKey::Calibers));
        }
        assert_eq!(Mutation::DeleteMetric { id: 7 }.method(), HttpMethod::Delete);
        assert_eq!(Mutation::DeleteMetric { id: 7 }.path(), "metrics/7");
    }

    #[test]
    fn test_metric_update() {
        let m = Mutation::UpdateMetric { id: 7 };
        assert!(m.invalidates(&any_list()));
        assert!(m.invalidates(&QueryKey::MetricDetail(7)));
        assert!(!m.invalidates(&QueryKey::MetricDetail(8)));
        assert!(!m.invalidates(&QueryKey::MetricSummary));
        assert_eq!(m.method(), HttpMethod::Patch);
    }

    #[test]
    fn test_version_create_and_update() {
        let create = Mutation::CreateVersion { metric_id: 7 };
        assert!(create.invalidates(&QueryKey::MetricVersions(7)));
        assert!(create.invalidates(&any_list()));
        assert!(!create.invalidates(&QueryKey::MetricVersions(8)));
        assert_eq!(create.path(), "metrics/7/versions");

        let update = Mutation::UpdateVersion { metric_id: 7, version_id: 11 };
        assert!(update.invalidates(&QueryKey::MetricVersions(7)));
        assert!(update.invalidates(&QueryKey::MetricDetail(7)));
        assert!(!update.invalidates(&any_list()));
        assert_eq!(update.path(), "metrics/7/versions/11");
    }

    #[test]
    fn test_version_delete_and_publish_refresh_counts() {
        let delete = Mutation::DeleteVersion { metric_id: 7, version_id: 11 };
        let publish = Mutation::RequestPublish { id: 7 };
        for m in [delete, publish] {
            assert!(m.invalidates(&QueryKey::MetricVersions(7)));
            assert!(m.invalidates(&QueryKey::MetricDetail(7)));
            assert!(m.invalidates(&any_list()));
            assert!(m.invalidates(&QueryKey::MetricSummary));
        }
        assert_eq!(publish.method(), HttpMethod::Post);
        assert_eq!(publish.path(), "metrics/7/publish");
    }

    #[test]
    fn test_caliber_library() {
        for m in [
            Mutation::CreateCaliber,
            Mutation::UpdateCaliber { id: 3 },
            Mutation::DeleteCaliber { id: 3 },
        ] {
            assert_eq!(m.invalidations(), vec![Invalidation::Resource(Resource::Calibers)]);
        }
        assert_eq!(Mutation::UpdateCaliber { id: 3 }.path(), "calibers/3");
    }

    #[test]
    fn test_bindings() {
        let scoped = QueryKey::VersionCalibers { metric_id: 7, version_id: 11 };
        let other_version = QueryKey::VersionCalibers { metric_id: 7, version_id: 12 };
        for m in [
            Mutation::CreateBinding { metric_id: 7, version_id: 11 },
            Mutation::UpdateBinding { metric_id: 7, version_id: 11, binding_id: 5 },
            Mutation::DeleteBinding { metric_id: 7, version_id: 11, binding_id: 5 },
        ] {
            assert!(m.invalidates(&scoped));
            assert!(m.invalidates(&QueryKey::MetricDetail(7)));
            assert!(!m.invalidates(&other_version));
            assert!(!m.invalidates(&QueryKey::Calibers));
        }
        assert_eq!(
            Mutation::DeleteBinding { metric_id: 7, version_id: 11, binding_id: 5 }.path(),
            "metrics/7/versions/11/calibers/5"
        );
    }

    #[test]
    fn test_request_carries_body() {
        let body = serde_json::json!({"name": "GMV"});
        let req = Mutation::UpdateMetric { id: 7 }.request(Some(body.clone()));
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body, Some(body));
        assert!(Mutation::DeleteCaliber { id: 1 }.request(None).body.is_none());
    }
}
