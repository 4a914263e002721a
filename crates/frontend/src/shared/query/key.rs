use crate::shared::api_utils::ApiRequest;
use contracts::domain::a001_metric::aggregate::MetricListFilters;
use contracts::domain::a003_dimension::aggregate::{DimensionFilter, DimensionKind};

/// Resource family of a cache key, the unit of prefix invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    DashboardOverview,
    MetricSummary,
    MetricList,
    MetricDetail,
    MetricVersions,
    Calibers,
    VersionCalibers,
    Dimension,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::DashboardOverview => "dashboard-overview",
            Resource::MetricSummary => "metric-summary",
            Resource::MetricList => "metric-list",
            Resource::MetricDetail => "metric-detail",
            Resource::MetricVersions => "metric-versions",
            Resource::Calibers => "calibers",
            Resource::VersionCalibers => "version-calibers",
            Resource::Dimension => "dimension",
        }
    }
}

/// Cache key: resource plus the parameters that select one payload.
///
/// Parameters are compared by value, so two field-equal filter objects
/// address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    DashboardOverview,
    MetricSummary,
    MetricList(MetricListFilters),
    MetricDetail(i64),
    MetricVersions(i64),
    Calibers,
    VersionCalibers { metric_id: i64, version_id: i64 },
    Dimension(DimensionKind, DimensionFilter),
}

impl QueryKey {
    pub fn resource(&self) -> Resource {
        match self {
            QueryKey::DashboardOverview => Resource::DashboardOverview,
            QueryKey::MetricSummary => Resource::MetricSummary,
            QueryKey::MetricList(_) => Resource::MetricList,
            QueryKey::MetricDetail(_) => Resource::MetricDetail,
            QueryKey::MetricVersions(_) => Resource::MetricVersions,
            QueryKey::Calibers => Resource::Calibers,
            QueryKey::VersionCalibers { .. } => Resource::VersionCalibers,
            QueryKey::Dimension(..) => Resource::Dimension,
        }
    }

    /// GET request that loads this key
    pub fn request(&self) -> ApiRequest {
        match self {
            QueryKey::DashboardOverview => ApiRequest::get("dashboard/overview"),
            QueryKey::MetricSummary => ApiRequest::get("metrics/summary"),
            QueryKey::MetricList(filters) => ApiRequest::get("metrics").with_query(filters),
            QueryKey::MetricDetail(id) => ApiRequest::get(format!("metrics/{}", id)),
            QueryKey::MetricVersions(id) => ApiRequest::get(format!("metrics/{}/versions", id)),
            QueryKey::Calibers => ApiRequest::get("calibers"),
            QueryKey::VersionCalibers {
                metric_id,
                version_id,
            } => ApiRequest::get(format!(
                "metrics/{}/versions/{}/calibers",
                metric_id, version_id
            )),
            QueryKey::Dimension(kind, filter) => {
                ApiRequest::get(format!("dimensions/{}", kind.path_segment())).with_query(filter)
            }
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::MetricList(filters) => write!(f, "{}{:?}", self.resource().as_str(), filters),
            QueryKey::MetricDetail(id) | QueryKey::MetricVersions(id) => {
                write!(f, "{}({})", self.resource().as_str(), id)
            }
            QueryKey::VersionCalibers {
                metric_id,
                version_id,
            } => write!(f, "{}({}, {})", self.resource().as_str(), metric_id, version_id),
            QueryKey::Dimension(kind, filter) => write!(
                f,
                "{}-{}({:?})",
                self.resource().as_str(),
                kind.path_segment(),
                filter.keyword
            ),
            _ => f.write_str(self.resource().as_str()),
        }
    }
}

/// What a successful mutation marks stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Every key of the resource, whatever its parameters
    Resource(Resource),
    /// One exact key
    Key(QueryKey),
}

impl Invalidation {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Invalidation::Resource(resource) => key.resource() == *resource,
            Invalidation::Key(k) => k == key,
        }
    }
}
