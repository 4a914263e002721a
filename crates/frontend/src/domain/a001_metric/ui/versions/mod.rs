use super::form::{VersionFields, VersionForm};
use crate::domain::a001_metric::api::{
    delete_version, request_publish, update_version, use_metric_list, use_metric_versions,
};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::form::options_from;
use crate::shared::components::{
    ConfirmDialog, DateField, EmptyState, ErrorBox, PageHeader, QueryStatus, SelectField,
    StatusBadge, TextAreaField, TextField,
};
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::query::use_query_client;
use contracts::domain::a001_metric::aggregate::{Metric, MetricListFilters, MetricVersion};
use contracts::enums::VersionStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Metric shown in the picker: the stored selection, else the first listed one.
pub fn picked_metric(metrics: &[Metric], selected: Option<i64>) -> Option<i64> {
    selected.or_else(|| metrics.first().map(|m| m.id))
}

#[component]
#[allow(non_snake_case)]
pub fn VersionManagement() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let client = use_query_client();

    let list = use_metric_list(Signal::derive(MetricListFilters::default));
    let metrics = Signal::derive(move || list.data.get().unwrap_or_default());
    let metric_id = Signal::derive(move || picked_metric(&metrics.get(), ctx.selected_metric_id()));
    let versions = use_metric_versions(metric_id);

    let picker = RwSignal::new(String::new());
    Effect::new(move |_| {
        picker.set(metric_id.get().map(|id| id.to_string()).unwrap_or_default());
    });
    Effect::new(move |prev: Option<String>| {
        let raw = picker.get();
        if prev.is_some() {
            if let Ok(id) = raw.parse::<i64>() {
                if Some(id) != metric_id.get_untracked() {
                    ctx.set_selected_metric_id(Some(id));
                }
            }
        }
        raw
    });
    let metric_options = Signal::derive(move || {
        metrics
            .get()
            .into_iter()
            .map(|m| (m.id.to_string(), format!("{} · {}", m.code, m.name)))
            .collect::<Vec<_>>()
    });

    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // edit
    let fields = VersionFields::new();
    let editing = RwSignal::new(None::<i64>);
    let edit_open = RwSignal::new(false);
    let start_edit = move |v: &MetricVersion| {
        fields.load(VersionForm::from_version(v));
        editing.set(Some(v.id));
        error.set(None);
        edit_open.set(true);
    };
    let save_edit = move |_| {
        let (Some(mid), Some(vid)) = (metric_id.get_untracked(), editing.get_untracked()) else {
            return;
        };
        let dto = match fields.snapshot().to_update_dto() {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e.user_message()));
                return;
            }
        };
        busy.set(true);
        spawn_local(async move {
            match update_version(client, mid, vid, dto).await {
                Ok(_) => {
                    edit_open.set(false);
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Failed to update version: {}", e.user_message()))),
            }
            busy.set(false);
        });
    };

    // delete
    let pending_delete = RwSignal::new(None::<MetricVersion>);
    let confirm_open = RwSignal::new(false);
    let confirm_delete = Callback::new(move |_| {
        let (Some(mid), Some(v)) = (metric_id.get_untracked(), pending_delete.get_untracked()) else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            match delete_version(client, mid, v.id).await {
                Ok(()) => error.set(None),
                Err(e) => error.set(Some(format!("Failed to delete version: {}", e.user_message()))),
            }
            busy.set(false);
            confirm_open.set(false);
            pending_delete.set(None);
        });
    });

    let publish = move |_| {
        let Some(mid) = metric_id.get_untracked() else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            match request_publish(client, mid).await {
                Ok(m) => {
                    log::info!("publish requested for {}", m.code);
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Publish request failed: {}", e.user_message()))),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Version management" subtitle="Review, edit and publish metric versions.".to_string()>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=publish
                    disabled=Signal::derive(move || busy.get() || metric_id.get().is_none())
                >
                    {icon("upload")}
                    " Request publish"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <SelectField label="Metric" value=picker options=metric_options />
            </div>

            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
            <QueryStatus is_loading=list.is_loading error=list.error />
            <QueryStatus is_loading=versions.is_loading error=versions.error loading_text="Loading versions..." />

            <Show
                when=move || !versions.data.get().unwrap_or_default().is_empty()
                fallback=|| view! { <EmptyState text="No versions for this metric" /> }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Version"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>"Grain"</TableHeaderCell>
                            <TableHeaderCell>"Effective"</TableHeaderCell>
                            <TableHeaderCell>"Bindings"</TableHeaderCell>
                            <TableHeaderCell>"Created"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || versions.data.get().unwrap_or_default()
                            key=|v| (v.id, v.status.clone(), v.version.clone(), v.effective_to)
                            children=move |v: MetricVersion| {
                                let label = v.version.clone().unwrap_or_else(|| format!("#{}", v.id));
                                let status = v.status.clone();
                                let grain = v.grain_label();
                                let range = v.effective_range_label();
                                let bound = v.calibers.len();
                                let created = format_timestamp(&v.created_at);
                                let to_edit = v.clone();
                                let to_delete = v;
                                view! {
                                    <TableRow>
                                        <TableCell>{label}</TableCell>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                        <TableCell>{grain}</TableCell>
                                        <TableCell>{range}</TableCell>
                                        <TableCell>{bound}</TableCell>
                                        <TableCell>{created}</TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| start_edit(&to_edit)
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| {
                                                        pending_delete.set(Some(to_delete.clone()));
                                                        confirm_open.set(true);
                                                    }
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </Show>

            <Dialog open=edit_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Edit version"</DialogTitle>
                        <DialogContent>
                            <div class="form-grid">
                                <TextField label="Version" value=fields.version />
                                <SelectField
                                    label="Status"
                                    value=fields.status
                                    options=options_from(&VersionStatus::ALL.map(|s| s.as_str()))
                                />
                                <TextField label="Grain" value=fields.grain />
                                <TextField label="Data sources" value=fields.data_sources />
                                <DateField label="Effective from" value=fields.effective_from />
                                <DateField label="Effective to" value=fields.effective_to />
                                <TextAreaField label="SQL formula" value=fields.formula_sql />
                                <TextAreaField label="DSL (JSON)" value=fields.formula_dsl />
                                <TextAreaField label="Notes" value=fields.notes />
                            </div>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| edit_open.set(false)>
                                "Cancel"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=save_edit
                                disabled=busy
                            >
                                "Save"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>

            <ConfirmDialog
                open=confirm_open
                title=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|v| format!("Delete version {}?", v.version.unwrap_or_else(|| format!("#{}", v.id))))
                        .unwrap_or_default()
                })
                message="Caliber bindings of this version are removed as well."
                on_confirm=confirm_delete
                busy=busy
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: i64) -> Metric {
        serde_json::from_value(serde_json::json!({
            "id": id, "code": "M", "name": "x", "type": "kpi", "sensitivity": "normal",
            "created_at": "x", "updated_at": "x"
        }))
        .unwrap()
    }

    #[test]
    fn test_picked_metric() {
        let metrics = vec![metric(4), metric(9)];
        assert_eq!(picked_metric(&metrics, None), Some(4));
        assert_eq!(picked_metric(&metrics, Some(9)), Some(9));
        assert_eq!(picked_metric(&[], None), None);
    }
}
