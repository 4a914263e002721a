use crate::shared::components::{EmptyState, PageHeader};
use leptos::prelude::*;

/// Заглушка для разделов без собственного экрана (загрузка, задания, система)
#[component]
pub fn PlaceholderPage(title: &'static str) -> impl IntoView {
    view! {
        <div class="page">
            <PageHeader title=title />
            <div class="details-card">
                <EmptyState text=format!("{} is under construction.", title) />
            </div>
        </div>
    }
}
