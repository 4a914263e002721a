use super::view_model::MetricDetailsVm;
use crate::domain::a002_caliber::ui::binding_form::BindingFields;
use crate::shared::components::form::options_from;
use crate::shared::components::{
    ConfirmDialog, EmptyState, QueryStatus, SelectField, StatusBadge, TextAreaField, TextField,
};
use crate::shared::icons::icon;
use contracts::domain::a002_caliber::aggregate::VersionCaliber;
use contracts::enums::BindingStatus;
use leptos::prelude::*;
use thaw::*;

#[component]
fn BindingFieldsGrid(vm: MetricDetailsVm, fields: BindingFields, pick_caliber: bool) -> impl IntoView {
    let caliber_options = Signal::derive(move || {
        let mut opts = vec![(String::new(), "Select a caliber".to_string())];
        opts.extend(
            vm.calibers
                .data
                .get()
                .unwrap_or_default()
                .into_iter()
                .map(|c| (c.id.to_string(), c.label())),
        );
        opts
    });

    view! {
        <div class="form-grid">
            {pick_caliber.then(|| view! {
                <SelectField label="Caliber" value=fields.caliber_id options=caliber_options />
            })}
            <SelectField
                label="Status"
                value=fields.status
                options=options_from(&BindingStatus::ALL.map(|s| s.as_str()))
            />
            <TextField label="Order" value=fields.order_index placeholder="0" />
            <TextField label="Override data sources" value=fields.override_data_sources />
            <TextAreaField label="Override SQL" value=fields.override_expr_sql />
            <TextAreaField label="Override DSL (JSON)" value=fields.override_expr_dsl />
            <TextAreaField label="Notes" value=fields.notes />
        </div>
    }
}

#[component]
pub fn BindingsCard(vm: MetricDetailsVm) -> impl IntoView {
    let bindings = Signal::derive(move || {
        let mut list = vm.bindings.data.get().unwrap_or_default();
        list.sort_by_key(|b| (b.order_index, b.id));
        list
    });
    let version_label = move || match vm.current_version() {
        Some(v) => format!(
            "Current version: {} · {}",
            v.version.unwrap_or_else(|| format!("#{}", v.id)),
            v.status
        ),
        None => "No version selected".to_string(),
    };

    let pending_delete = RwSignal::new(None::<VersionCaliber>);
    let confirm_open = RwSignal::new(false);
    let confirm_delete = Callback::new(move |_| {
        if let Some(b) = pending_delete.get_untracked() {
            vm.delete_binding(b.id);
        }
        confirm_open.set(false);
        pending_delete.set(None);
    });

    view! {
        <div class="details-card">
            <div class="details-card__header">
                <div>
                    <h3 class="details-section__title">"Caliber bindings"</h3>
                    <p class="details-card__subtitle">{version_label}</p>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.open_new_binding()
                    disabled=Signal::derive(move || vm.current_version_id.get().is_none())
                >
                    {icon("plus")}
                    " Add binding"
                </Button>
            </div>

            <QueryStatus is_loading=vm.bindings.is_loading error=vm.bindings.error />
            <Show
                when=move || !bindings.get().is_empty()
                fallback=|| view! { <EmptyState text="No calibers bound to this version" /> }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Order"</TableHeaderCell>
                            <TableHeaderCell>"Caliber"</TableHeaderCell>
                            <TableHeaderCell>"Category"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || bindings.get()
                            key=|b| (b.id, b.order_index, b.status.clone(), b.notes.clone())
                            children=move |b: VersionCaliber| {
                                let category = b
                                    .caliber
                                    .as_ref()
                                    .map(|c| c.category.clone())
                                    .unwrap_or_else(|| "—".to_string());
                                let order = b.order_index;
                                let caliber = b.caliber_label();
                                let status = b.status.clone();
                                let to_edit = b.clone();
                                let to_delete = b;
                                view! {
                                    <TableRow>
                                        <TableCell>{order}</TableCell>
                                        <TableCell><TableCellLayout truncate=true>{caliber}</TableCellLayout></TableCell>
                                        <TableCell>{category}</TableCell>
                                        <TableCell><StatusBadge status=status /></TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| vm.start_edit_binding(to_edit.clone())
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

            <Dialog open=vm.binding_dialog_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Bind caliber"</DialogTitle>
                        <DialogContent>
                            <BindingFieldsGrid vm=vm fields=vm.new_binding pick_caliber=true />
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.binding_dialog_open.set(false)>
                                "Cancel"
                            </Button>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.save_new_binding() disabled=vm.busy>
                                "Bind"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>

            <Dialog open=vm.binding_edit_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>
                            {move || vm.editing_binding.get().map(|b| format!("Edit binding {}", b.caliber_label())).unwrap_or_default()}
                        </DialogTitle>
                        <DialogContent>
                            <BindingFieldsGrid vm=vm fields=vm.edit_binding pick_caliber=false />
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.binding_edit_open.set(false)>
                                "Cancel"
                            </Button>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.save_binding() disabled=vm.busy>
                                "Save"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>

            <ConfirmDialog
                open=confirm_open
                title=Signal::derive(move || {
                    pending_delete.get().map(|b| format!("Remove {}?", b.caliber_label())).unwrap_or_default()
                })
                message="The caliber stays in the library; only this binding is removed."
                on_confirm=confirm_delete
                busy=vm.busy
            />
        </div>
    }
}
