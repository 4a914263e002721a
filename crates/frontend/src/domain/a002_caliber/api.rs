//! Caliber library and per-version caliber bindings.

use crate::shared::api_utils::ApiError;
use crate::shared::query::{use_query, Mutation, QueryClient, QueryKey, QueryResult};
use contracts::domain::a002_caliber::aggregate::{
    Caliber, CaliberCreateDto, CaliberUpdateDto, VersionCaliber, VersionCaliberCreateDto,
    VersionCaliberUpdateDto,
};
use leptos::prelude::*;

pub fn use_calibers() -> QueryResult<Vec<Caliber>> {
    use_query(|| Some(QueryKey::Calibers))
}

/// Enabled only when both ids are known
pub fn use_version_calibers(
    metric_id: Signal<Option<i64>>,
    version_id: Signal<Option<i64>>,
) -> QueryResult<Vec<VersionCaliber>> {
    use_query(move || match (metric_id.get(), version_id.get()) {
        (Some(metric_id), Some(version_id)) => Some(QueryKey::VersionCalibers {
            metric_id,
            version_id,
        }),
        _ => None,
    })
}

pub async fn create_caliber(client: QueryClient, dto: CaliberCreateDto) -> Result<Caliber, ApiError> {
    client.mutate_with(Mutation::CreateCaliber, &dto).await
}

pub async fn update_caliber(
    client: QueryClient,
    id: i64,
    dto: CaliberUpdateDto,
) -> Result<Caliber, ApiError> {
    client.mutate_with(Mutation::UpdateCaliber { id }, &dto).await
}

pub async fn delete_caliber(client: QueryClient, id: i64) -> Result<(), ApiError> {
    client.mutate(Mutation::DeleteCaliber { id }).await
}

pub async fn create_binding(
    client: QueryClient,
    metric_id: i64,
    version_id: i64,
    dto: VersionCaliberCreateDto,
) -> Result<VersionCaliber, ApiError> {
    client
        .mutate_with(
            Mutation::CreateBinding {
                metric_id,
                version_id,
            },
            &dto,
        )
        .await
}

pub async fn update_binding(
    client: QueryClient,
    metric_id: i64,
    version_id: i64,
    binding_id: i64,
    dto: VersionCaliberUpdateDto,
) -> Result<VersionCaliber, ApiError> {
    client
        .mutate_with(
            Mutation::UpdateBinding {
                metric_id,
                version_id,
                binding_id,
            },
            &dto,
        )
        .await
}

pub async fn delete_binding(
    client: QueryClient,
    metric_id: i64,
    version_id: i64,
    binding_id: i64,
) -> Result<(), ApiError> {
    client
        .mutate(Mutation::DeleteBinding {
            metric_id,
            version_id,
            binding_id,
        })
        .await
}
