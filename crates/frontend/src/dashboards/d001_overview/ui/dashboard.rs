use crate::dashboards::d001_overview::api::use_dashboard_overview;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::views::ViewKey;
use crate::shared::components::{
    EmptyState, PageHeader, QueryStatus, StatCard, StatTone, StatusBadge,
};
use contracts::dashboards::d001_overview::dto::{OverviewStats, UploadBatch};
use leptos::prelude::*;
use thaw::*;

fn warn_if(nonzero: i64) -> StatTone {
    if nonzero > 0 {
        StatTone::Warning
    } else {
        StatTone::Neutral
    }
}

#[component]
#[allow(non_snake_case)]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let overview = use_dashboard_overview();
    let stats = Memo::new(move |_| overview.data.get().map(|o| o.stats));

    let stat = move |pick: fn(&OverviewStats) -> i64| {
        Signal::derive(move || stats.get().as_ref().map(pick))
    };
    let note = move |render: fn(&OverviewStats) -> String| {
        Signal::derive(move || stats.get().as_ref().map(render))
    };

    let uploads = Signal::derive(move || {
        overview
            .data
            .get()
            .map(|o| o.uploads)
            .unwrap_or_default()
    });

    view! {
        <div class="page">
            <PageHeader title="Overview" subtitle="Metric catalogue health at a glance.".to_string()>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.set_active_view(ViewKey::MetricList)
                >
                    "Open metric list"
                </Button>
            </PageHeader>

            <QueryStatus is_loading=overview.is_loading error=overview.error />

            <div class="stat-grid">
                <StatCard
                    label="Registered metrics"
                    icon_name="database"
                    value=stat(|s| s.registered_metrics.total)
                    subtitle=note(|s| format!("{} sensitive", s.registered_metrics.sensitive))
                />
                <StatCard
                    label="Active versions"
                    icon_name="layers"
                    value=stat(|s| s.active_versions.total)
                    subtitle=note(|s| format!("{} released this week", s.active_versions.released_this_week))
                    tone=StatTone::Success
                />
                <StatCard
                    label="Yesterday's jobs"
                    icon_name="calendar"
                    value=stat(|s| s.yesterday_jobs.total)
                    subtitle=note(|s| format!("{} failed", s.yesterday_jobs.failed))
                    tone=Signal::derive(move || {
                        match stats.get().map(|s| s.yesterday_jobs.failed) {
                            Some(failed) if failed > 0 => StatTone::Error,
                            _ => StatTone::Neutral,
                        }
                    })
                />
                <StatCard
                    label="Recent uploads"
                    icon_name="upload"
                    value=stat(|s| s.recent_uploads.total)
                    subtitle=note(|s| format!("{} queued for processing", s.recent_uploads.processing))
                    tone=Signal::derive(move || {
                        warn_if(stats.get().map(|s| s.recent_uploads.processing).unwrap_or(0))
                    })
                />
            </div>

            <div class="dashboard-row">
                <div class="details-card">
                    <h3 class="details-section__title">
                        {move || {
                            overview
                                .data
                                .get()
                                .map(|o| o.task_summary.title)
                                .filter(|t| !t.is_empty())
                                .unwrap_or_else(|| "Task overview".to_string())
                        }}
                    </h3>
                    <p class="details-card__subtitle">
                        {move || {
                            overview
                                .data
                                .get()
                                .map(|o| o.task_summary.description)
                                .filter(|d| !d.is_empty())
                                .unwrap_or_else(|| "Job statistics will appear here.".to_string())
                        }}
                    </p>
                </div>

                <div class="details-card">
                    <div class="details-card__header">
                        <h3 class="details-section__title">"Recent uploads"</h3>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| ctx.set_active_view(ViewKey::Upload)
                        >
                            "New upload"
                        </Button>
                    </div>
                    <Show
                        when=move || !uploads.get().is_empty()
                        fallback=|| view! { <EmptyState text="No uploads yet" /> }
                    >
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Batch"</TableHeaderCell>
                                    <TableHeaderCell>"Source"</TableHeaderCell>
                                    <TableHeaderCell>"File"</TableHeaderCell>
                                    <TableHeaderCell>"Status"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || uploads.get()
                                    key=|u| u.batch_id.clone()
                                    children=move |u: UploadBatch| view! {
                                        <TableRow>
                                            <TableCell>{u.batch_id.clone()}</TableCell>
                                            <TableCell>{u.source.clone()}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{u.filename.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell><StatusBadge status=u.status.clone() /></TableCell>
                                        </TableRow>
                                    }
                                />
                            </TableBody>
                        </Table>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_if() {
        assert_eq!(warn_if(0), StatTone::Neutral);
        assert_eq!(warn_if(3), StatTone::Warning);
    }
}
