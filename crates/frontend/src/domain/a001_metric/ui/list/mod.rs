use super::form::{MetricFields, VersionFields};
use crate::domain::a001_metric::api::{create_metric, delete_metric, use_metric_list, use_metric_summary};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::form::{filter_options, options_from};
use crate::shared::components::{
    ConfirmDialog, DateField, EmptyState, ErrorBox, PageHeader, QueryStatus, SelectField,
    SensitivityBadge, TextAreaField, TextField,
};
use crate::shared::icons::icon;
use crate::shared::query::use_query_client;
use contracts::domain::a001_metric::aggregate::{Metric, MetricListFilters, FILTER_ALL};
use contracts::enums::{Sensitivity, VersionStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Subject areas seen in the current page plus the active selection, so the
/// selected option never disappears from the dropdown.
pub fn subject_area_options(metrics: &[Metric], selected: &str) -> Vec<String> {
    let mut values: Vec<String> = metrics
        .iter()
        .filter_map(|m| m.subject_area.clone())
        .filter(|s| !s.is_empty())
        .collect();
    if selected != FILTER_ALL && !selected.is_empty() {
        values.push(selected.to_string());
    }
    values.sort();
    values.dedup();
    values
}

fn sensitivity_values() -> Vec<&'static str> {
    Sensitivity::ALL.iter().map(|s| s.as_str()).collect()
}

#[component]
#[allow(non_snake_case)]
pub fn MetricList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let client = use_query_client();

    let keyword = RwSignal::new(String::new());
    let subject_area = RwSignal::new(FILTER_ALL.to_string());
    let sensitivity = RwSignal::new(FILTER_ALL.to_string());
    let filters = Signal::derive(move || {
        MetricListFilters::normalized(&keyword.get(), &subject_area.get(), &sensitivity.get())
    });

    let list = use_metric_list(filters);
    let summary = use_metric_summary();
    let metrics = Signal::derive(move || list.data.get().unwrap_or_default());

    let area_options = Signal::derive(move || {
        let mut opts = vec![(FILTER_ALL.to_string(), "All subject areas".to_string())];
        opts.extend(
            subject_area_options(&metrics.get(), &subject_area.get())
                .into_iter()
                .map(|a| (a.clone(), a)),
        );
        opts
    });
    let sensitivity_options = filter_options("All sensitivity", &sensitivity_values());

    let reset_filters = move |_| {
        keyword.set(String::new());
        subject_area.set(FILTER_ALL.to_string());
        sensitivity.set(FILTER_ALL.to_string());
    };

    // create
    let show_create = RwSignal::new(false);
    let metric_fields = MetricFields::new();
    let version_fields = VersionFields::new();
    let create_error = RwSignal::new(None::<String>);
    let creating = RwSignal::new(false);

    let open_create = move |_| {
        metric_fields.reset();
        version_fields.reset();
        create_error.set(None);
        show_create.set(true);
    };

    let submit_create = move |_| {
        let dto = match metric_fields
            .snapshot()
            .to_create_dto(&version_fields.snapshot())
        {
            Ok(dto) => dto,
            Err(e) => {
                create_error.set(Some(e.user_message()));
                return;
            }
        };
        creating.set(true);
        create_error.set(None);
        spawn_local(async move {
            match create_metric(client, dto).await {
                Ok(created) => {
                    log::info!("metric {} created", created.code);
                    show_create.set(false);
                }
                Err(e) => create_error.set(Some(format!("Failed to create metric: {}", e.user_message()))),
            }
            creating.set(false);
        });
    };

    // delete
    let pending_delete = RwSignal::new(None::<(i64, String)>);
    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let delete_error = RwSignal::new(None::<String>);

    let ask_delete = move |id: i64, name: String| {
        pending_delete.set(Some((id, name)));
        confirm_open.set(true);
    };

    let confirm_delete = Callback::new(move |_| {
        let Some((id, _)) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match delete_metric(client, id).await {
                Ok(()) => delete_error.set(None),
                Err(e) => delete_error.set(Some(format!("Failed to delete metric: {}", e.user_message()))),
            }
            deleting.set(false);
            confirm_open.set(false);
            pending_delete.set(None);
        });
    });

    let subtitle = Signal::derive(move || {
        let s = summary.data.get().unwrap_or_default();
        Some(format!(
            "{} metrics in total, {} sensitive.",
            s.total_metrics, s.sensitive_metrics
        ))
    });

    view! {
        <div class="page">
            <PageHeader title="Metrics" subtitle=subtitle>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("Active versions {}", summary.data.get().map(|s| s.active_versions).unwrap_or(0))}
                </Badge>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>
                    {move || format!("Drafts {}", summary.data.get().map(|s| s.draft_versions).unwrap_or(0))}
                </Badge>
                <Button appearance=ButtonAppearance::Primary on_click=open_create>
                    {icon("plus")}
                    " New metric"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <Flex gap=FlexGap::Medium align=FlexAlign::End>
                    <div class="form__group">
                        <label class="form__label">"Search"</label>
                        <Input value=keyword placeholder="Name / code / owner" />
                    </div>
                    <SelectField label="Subject area" value=subject_area options=area_options />
                    <SelectField label="Sensitivity" value=sensitivity options=sensitivity_options />
                    <Button appearance=ButtonAppearance::Secondary on_click=reset_filters>
                        "Reset"
                    </Button>
                </Flex>
            </div>

            {move || delete_error.get().map(|e| view! { <ErrorBox message=e /> })}
            <QueryStatus is_loading=list.is_loading error=list.error />

            <Show
                when=move || !metrics.get().is_empty() || list.is_loading.get()
                fallback=|| view! { <EmptyState text="No metrics match the filters" /> }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Subject area"</TableHeaderCell>
                            <TableHeaderCell>"Type"</TableHeaderCell>
                            <TableHeaderCell>"Unit"</TableHeaderCell>
                            <TableHeaderCell>"Owner"</TableHeaderCell>
                            <TableHeaderCell>"Sensitivity"</TableHeaderCell>
                            <TableHeaderCell>"Current version"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || metrics.get()
                            key=|m| (m.id, m.updated_at.clone(), m.versions.len())
                            children=move |m: Metric| {
                                let id = m.id;
                                let name = m.name.clone();
                                let current = m.current_version_label();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{m.code.clone()}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{m.name.clone()}</TableCellLayout></TableCell>
                                        <TableCell>{m.subject_area.clone().unwrap_or_else(|| "—".to_string())}</TableCell>
                                        <TableCell>{m.metric_type.clone()}</TableCell>
                                        <TableCell>{m.unit.clone().unwrap_or_else(|| "—".to_string())}</TableCell>
                                        <TableCell>{m.owner.clone().unwrap_or_else(|| "—".to_string())}</TableCell>
                                        <TableCell><SensitivityBadge level=m.sensitivity.clone() /></TableCell>
                                        <TableCell>{current}</TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| ctx.open_metric(id)
                                                >
                                                    "View"
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| ask_delete(id, name.clone())
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

            <ConfirmDialog
                open=confirm_open
                title=Signal::derive(move || {
                    pending_delete.get().map(|(_, n)| format!("Delete metric {}?", n)).unwrap_or_default()
                })
                message="Versions and caliber bindings of the metric are removed as well. This cannot be undone."
                on_confirm=confirm_delete
                busy=deleting
            />

            <Dialog open=show_create>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"New metric"</DialogTitle>
                        <DialogContent>
                            {move || create_error.get().map(|e| view! { <ErrorBox message=e /> })}
                            <h4 class="details-section__title">"Basic info"</h4>
                            <div class="form-grid">
                                <TextField label="Code" value=metric_fields.code placeholder="e.g. M_GMV" required=true />
                                <TextField label="Name" value=metric_fields.name placeholder="e.g. Gross merchandise value" required=true />
                                <TextField label="Type" value=metric_fields.metric_type placeholder="e.g. finance / KPI" required=true />
                                <TextField label="Unit" value=metric_fields.unit placeholder="e.g. CNY / %" />
                                <TextField label="Subject area" value=metric_fields.subject_area placeholder="e.g. trade / user" />
                                <TextField label="Owner" value=metric_fields.owner />
                                <SelectField label="Sensitivity" value=metric_fields.sensitivity options=options_from(&sensitivity_values()) />
                                <TextAreaField label="Description" value=metric_fields.description />
                            </div>
                            <h4 class="details-section__title">"Initial version"</h4>
                            <div class="form-grid">
                                <TextField label="Version" value=version_fields.version placeholder="e.g. v1" />
                                <SelectField
                                    label="Status"
                                    value=version_fields.status
                                    options=options_from(&VersionStatus::ALL.map(|s| s.as_str()))
                                />
                                <TextField label="Grain" value=version_fields.grain placeholder="company, product, channel" required=true />
                                <TextField label="Data sources" value=version_fields.data_sources placeholder="dwd_trade_order, dwd_user_profile" />
                                <DateField label="Effective from" value=version_fields.effective_from required=true />
                                <DateField label="Effective to" value=version_fields.effective_to required=true />
                                <TextAreaField label="Notes" value=version_fields.notes />
                                <TextAreaField label="SQL formula" value=version_fields.formula_sql placeholder="optional" />
                            </div>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_create.set(false)>
                                "Cancel"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=submit_create
                                disabled=Signal::derive(move || creating.get())
                            >
                                "Create metric"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: i64, area: Option<&str>) -> Metric {
        serde_json::from_value(serde_json::json!({
            "id": id, "code": format!("M_{}", id), "name": "x", "type": "kpi",
            "subject_area": area, "sensitivity": "normal",
            "created_at": "x", "updated_at": "x"
        }))
        .unwrap()
    }

    #[test]
    fn test_subject_area_options() {
        let metrics = vec![metric(1, Some("trade")), metric(2, None), metric(3, Some("trade")), metric(4, Some("user"))];
        assert_eq!(subject_area_options(&metrics, "all"), vec!["trade", "user"]);
        // selection survives a result set that no longer contains it
        assert_eq!(subject_area_options(&[], "finance"), vec!["finance"]);
    }
}
