use super::view_model::MetricDetailsVm;
use crate::domain::a001_metric::ui::form::VersionFields;
use crate::shared::components::form::options_from;
use crate::shared::components::{DateField, EmptyState, SelectField, StatusBadge, TextAreaField, TextField};
use crate::shared::date_utils::format_timestamp;
use contracts::domain::a001_metric::aggregate::MetricVersion;
use contracts::enums::VersionStatus;
use leptos::prelude::*;
use thaw::*;

fn status_options() -> Vec<(String, String)> {
    options_from(&VersionStatus::ALL.map(|s| s.as_str()))
}

#[component]
fn VersionFieldsGrid(fields: VersionFields, require_range: bool) -> impl IntoView {
    view! {
        <div class="form-grid">
            <TextField label="Version" value=fields.version placeholder="e.g. v2" />
            <SelectField label="Status" value=fields.status options=status_options() />
            <TextField label="Grain" value=fields.grain placeholder="company, product, channel" required=require_range />
            <TextField label="Data sources" value=fields.data_sources />
            <DateField label="Effective from" value=fields.effective_from required=require_range />
            <DateField label="Effective to" value=fields.effective_to required=require_range />
            <TextAreaField label="SQL formula" value=fields.formula_sql />
            <TextAreaField label="DSL (JSON)" value=fields.formula_dsl placeholder="{\"op\": \"sum\"}" />
            <TextAreaField label="Notes" value=fields.notes />
        </div>
    }
}

#[component]
pub fn VersionsCard(vm: MetricDetailsVm) -> impl IntoView {
    let versions = Signal::derive(move || vm.versions.data.get().unwrap_or_default());

    view! {
        <div class="details-card">
            <h3 class="details-section__title">"Versions"</h3>
            <Show
                when=move || !versions.get().is_empty()
                fallback=|| view! { <EmptyState text="No versions yet" /> }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Version"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>"Grain"</TableHeaderCell>
                            <TableHeaderCell>"Effective"</TableHeaderCell>
                            <TableHeaderCell>"Created"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || versions.get()
                            key=|v| (v.id, v.status.clone(), v.version.clone(), v.effective_to)
                            children=move |v: MetricVersion| {
                                let id = v.id;
                                let is_current = move || vm.current_version_id.get() == Some(id);
                                let label = v.version.clone().unwrap_or_else(|| format!("#{}", id));
                                let status = v.status.clone();
                                let grain = v.grain_label();
                                let range = v.effective_range_label();
                                let created = format_timestamp(&v.created_at);
                                let row = v;
                                view! {
                                    <TableRow class:table__row--selected=is_current>
                                        <TableCell>{label}</TableCell>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                        <TableCell>{grain}</TableCell>
                                        <TableCell>{range}</TableCell>
                                        <TableCell>{created}</TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| vm.select_version(id)
                                                    disabled=Signal::derive(is_current)
                                                >
                                                    {move || if is_current() { "Current" } else { "Set current" }}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| vm.toggle_edit_version(&row)
                                                >
                                                    {move || if vm.editing_version.get() == Some(id) { "Collapse" } else { "Edit" }}
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

            <Show when=move || vm.editing_version.get().is_some()>
                <div class="inline-editor">
                    <h4 class="details-section__title">"Edit version"</h4>
                    <VersionFieldsGrid fields=vm.edit_version require_range=false />
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.save_version() disabled=vm.busy>
                            "Save version"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.editing_version.set(None)>
                            "Cancel"
                        </Button>
                    </Flex>
                </div>
            </Show>

            <h4 class="details-section__title">"New version"</h4>
            <VersionFieldsGrid fields=vm.new_version require_range=true />
            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.create_version() disabled=vm.busy>
                "Create version"
            </Button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_options_cover_every_version_status() {
        let options = status_options();
        assert_eq!(options.len(), VersionStatus::ALL.len());
        for (status, (value, label)) in VersionStatus::ALL.iter().zip(&options) {
            assert_eq!(value, status.as_str());
            assert_eq!(label, status.as_str());
        }
    }
}
