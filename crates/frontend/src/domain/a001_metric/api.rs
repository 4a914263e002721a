//! Metric reads (cached) and writes (with invalidation).

use crate::shared::api_utils::ApiError;
use crate::shared::query::{use_query, Mutation, QueryClient, QueryKey, QueryResult};
use contracts::domain::a001_metric::aggregate::{
    Metric, MetricCreateDto, MetricListFilters, MetricSummary, MetricUpdateDto, MetricVersion,
    MetricVersionCreateDto, MetricVersionUpdateDto,
};
use leptos::prelude::*;

pub fn use_metric_summary() -> QueryResult<MetricSummary> {
    use_query(|| Some(QueryKey::MetricSummary))
}

pub fn use_metric_list(filters: Signal<MetricListFilters>) -> QueryResult<Vec<Metric>> {
    use_query(move || Some(QueryKey::MetricList(filters.get())))
}

/// Disabled while no metric is selected
pub fn use_metric_detail(metric_id: Signal<Option<i64>>) -> QueryResult<Metric> {
    use_query(move || metric_id.get().map(QueryKey::MetricDetail))
}

pub fn use_metric_versions(metric_id: Signal<Option<i64>>) -> QueryResult<Vec<MetricVersion>> {
    use_query(move || metric_id.get().map(QueryKey::MetricVersions))
}

pub async fn create_metric(client: QueryClient, dto: MetricCreateDto) -> Result<Metric, ApiError> {
    client.mutate_with(Mutation::CreateMetric, &dto).await
}

pub async fn update_metric(
    client: QueryClient,
    id: i64,
    dto: MetricUpdateDto,
) -> Result<Metric, ApiError> {
    client.mutate_with(Mutation::UpdateMetric { id }, &dto).await
}

pub async fn delete_metric(client: QueryClient, id: i64) -> Result<(), ApiError> {
    client.mutate(Mutation::DeleteMetric { id }).await
}

pub async fn request_publish(client: QueryClient, id: i64) -> Result<Metric, ApiError> {
    client.mutate(Mutation::RequestPublish { id }).await
}

pub async fn create_version(
    client: QueryClient,
    metric_id: i64,
    dto: MetricVersionCreateDto,
) -> Result<MetricVersion, ApiError> {
    client
        .mutate_with(Mutation::CreateVersion { metric_id }, &dto)
        .await
}

pub async fn update_version(
    client: QueryClient,
    metric_id: i64,
    version_id: i64,
    dto: MetricVersionUpdateDto,
) -> Result<MetricVersion, ApiError> {
    client
        .mutate_with(
            Mutation::UpdateVersion {
                metric_id,
                version_id,
            },
            &dto,
        )
        .await
}

pub async fn delete_version(
    client: QueryClient,
    metric_id: i64,
    version_id: i64,
) -> Result<(), ApiError> {
    client
        .mutate(Mutation::DeleteVersion {
            metric_id,
            version_id,
        })
        .await
}
