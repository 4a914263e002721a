use crate::shared::query::{use_query, QueryKey, QueryResult};
use contracts::dashboards::d001_overview::dto::DashboardOverview;

/// Стартовая сводка: счётчики, обзор задач, последние загрузки
pub fn use_dashboard_overview() -> QueryResult<DashboardOverview> {
    use_query(|| Some(QueryKey::DashboardOverview))
}
