//! Read-only dimension lookups.

use crate::shared::query::{use_query, QueryKey, QueryResult};
use contracts::domain::a003_dimension::aggregate::{DimensionFilter, DimensionKind};
use leptos::prelude::*;
use serde::de::DeserializeOwned;

/// Rows of one dimension kind; `T` is the row type of that kind
/// (`Company`, `Product`, `Channel`, `Combo`).
pub fn use_dimension<T>(kind: DimensionKind, keyword: Signal<String>) -> QueryResult<Vec<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    use_query(move || {
        Some(QueryKey::Dimension(
            kind,
            DimensionFilter::from_keyword(&keyword.get()),
        ))
    })
}
