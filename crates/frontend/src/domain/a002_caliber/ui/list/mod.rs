use super::super::api::{create_caliber, delete_caliber, update_caliber, use_calibers};
use super::form::{CaliberFields, CaliberForm};
use crate::shared::components::form::options_from;
use crate::shared::components::{
    ConfirmDialog, EmptyState, ErrorBox, PageHeader, QueryStatus, SelectField, TextAreaField,
    TextField,
};
use crate::shared::icons::icon;
use crate::shared::query::use_query_client;
use contracts::domain::a002_caliber::aggregate::Caliber;
use contracts::enums::CaliberCategory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Caliber library: reusable filter/aggregate/calculation rules.
#[component]
#[allow(non_snake_case)]
pub fn CaliberList() -> impl IntoView {
    let client = use_query_client();
    let calibers = use_calibers();
    let rows = Signal::derive(move || calibers.data.get().unwrap_or_default());

    let fields = CaliberFields::new();
    // None = creating a new caliber
    let editing = RwSignal::new(None::<i64>);
    let dialog_open = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);

    let open_create = move |_| {
        fields.load(CaliberForm::default());
        editing.set(None);
        form_error.set(None);
        dialog_open.set(true);
    };

    let open_edit = move |c: Caliber| {
        fields.load(CaliberForm::from_caliber(&c));
        editing.set(Some(c.id));
        form_error.set(None);
        dialog_open.set(true);
    };

    let save = move |_| {
        let form = fields.snapshot();
        let target = editing.get_untracked();
        saving.set(true);
        form_error.set(None);
        spawn_local(async move {
            let result = match target {
                None => match form.to_create_dto() {
                    Ok(dto) => create_caliber(client, dto).await,
                    Err(e) => Err(e),
                },
                Some(id) => match form.to_update_dto() {
                    Ok(dto) => update_caliber(client, id, dto).await,
                    Err(e) => Err(e),
                },
            };
            match result {
                Ok(saved) => {
                    log::info!("caliber {} saved", saved.code);
                    dialog_open.set(false);
                }
                Err(e) => form_error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    // delete
    let pending_delete = RwSignal::new(None::<Caliber>);
    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let delete_error = RwSignal::new(None::<String>);

    let confirm_delete = Callback::new(move |_| {
        let Some(caliber) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match delete_caliber(client, caliber.id).await {
                Ok(()) => delete_error.set(None),
                Err(e) => delete_error.set(Some(format!(
                    "Failed to delete {}: {}",
                    caliber.code,
                    e.user_message()
                ))),
            }
            deleting.set(false);
            confirm_open.set(false);
            pending_delete.set(None);
        });
    });

    let category_options = options_from(&CaliberCategory::ALL.map(|c| c.as_str()));

    view! {
        <div class="page">
            <PageHeader title="Caliber library" subtitle="Shared filter, aggregation and calculation rules".to_string()>
                <Button appearance=ButtonAppearance::Primary on_click=open_create>
                    {icon("plus")}
                    " New caliber"
                </Button>
            </PageHeader>

            {move || delete_error.get().map(|e| view! { <ErrorBox message=e /> })}
            <QueryStatus is_loading=calibers.is_loading error=calibers.error />

            <Show
                when=move || !rows.get().is_empty() || calibers.is_loading.get()
                fallback=|| view! { <EmptyState text="No calibers yet" /> }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Category"</TableHeaderCell>
                            <TableHeaderCell>"Value format"</TableHeaderCell>
                            <TableHeaderCell>"Unit override"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=|c| (c.id, c.name.clone(), c.category.clone(), c.value_format.clone(), c.notes.clone())
                            children=move |c: Caliber| {
                                let for_edit = c.clone();
                                let for_delete = c.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{c.code.clone()}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{c.name.clone()}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <Badge appearance=BadgeAppearance::Outline>{c.category.clone()}</Badge>
                                        </TableCell>
                                        <TableCell>{c.value_format.clone().unwrap_or_else(|| "—".to_string())}</TableCell>
                                        <TableCell>{c.unit_override.clone().unwrap_or_else(|| "—".to_string())}</TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_edit(for_edit.clone())
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| {
                                                        pending_delete.set(Some(for_delete.clone()));
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

            <ConfirmDialog
                open=confirm_open
                title=Signal::derive(move || {
                    pending_delete.get().map(|c| format!("Delete caliber {}?", c.code)).unwrap_or_default()
                })
                message="Versions bound to this caliber lose the binding."
                on_confirm=confirm_delete
                busy=deleting
            />

            <Dialog open=dialog_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>
                            {move || if editing.get().is_some() { "Edit caliber" } else { "New caliber" }}
                        </DialogTitle>
                        <DialogContent>
                            {move || form_error.get().map(|e| view! { <ErrorBox message=e /> })}
                            <div class="form-grid">
                                <Show when=move || editing.get().is_none()>
                                    <TextField label="Code" value=fields.code placeholder="e.g. CALC_ORDER_FILTER" required=true />
                                </Show>
                                <TextField label="Name" value=fields.name required=true />
                                <SelectField label="Category" value=fields.category options=category_options.clone() />
                                <TextField label="Value format" value=fields.value_format placeholder="e.g. 0.00%" />
                                <TextField label="Unit override" value=fields.unit_override />
                                <TextAreaField label="SQL expression" value=fields.expr_sql />
                                <TextAreaField label="DSL (JSON)" value=fields.expr_dsl />
                                <TextAreaField label="Notes" value=fields.notes />
                            </div>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| dialog_open.set(false)>
                                "Cancel"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=save
                                disabled=Signal::derive(move || saving.get())
                            >
                                "Save"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}
