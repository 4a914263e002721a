//! View registry - единственный источник правды для маппинга ViewKey → View.

use crate::dashboards::d001_overview::ui::OverviewDashboard;
use crate::domain::a001_metric::ui::details::MetricDetails;
use crate::domain::a001_metric::ui::list::MetricList;
use crate::domain::a001_metric::ui::versions::VersionManagement;
use crate::domain::a002_caliber::ui::list::CaliberList;
use crate::domain::a003_dimension::ui::list::DimensionBrowser;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::views::ViewKey;
use crate::system::pages::placeholder::PlaceholderPage;
use leptos::prelude::*;

/// Рендерит контент центральной области по ключу экрана.
///
/// The match is exhaustive: a new [`ViewKey`] variant does not compile until
/// it gets a view here.
pub fn render_view(key: ViewKey) -> AnyView {
    match key {
        ViewKey::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        ViewKey::MetricList => view! { <MetricList /> }.into_any(),
        ViewKey::MetricDetail => view! { <MetricDetails /> }.into_any(),
        ViewKey::Caliber => view! { <CaliberList /> }.into_any(),
        ViewKey::Dimension => view! { <DimensionBrowser /> }.into_any(),
        ViewKey::Version => view! { <VersionManagement /> }.into_any(),
        ViewKey::Upload | ViewKey::Jobs | ViewKey::System => {
            view! { <PlaceholderPage title=key.label() /> }.into_any()
        }
    }
}

/// Content area: re-renders only when the active view changes.
#[component]
pub fn ViewRenderer() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let active = Memo::new(move |_| ctx.active_view());

    move || render_view(active.get())
}
