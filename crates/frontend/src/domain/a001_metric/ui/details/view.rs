use super::bindings::BindingsCard;
use super::versions::VersionsCard;
use super::view_model::MetricDetailsVm;
use crate::shared::components::form::options_from;
use crate::shared::components::{
    EmptyState, ErrorBox, QueryStatus, SelectField, SensitivityBadge, TextAreaField, TextField,
};
use crate::shared::date_utils::{format_timestamp, EMPTY};
use crate::shared::icons::icon;
use contracts::enums::Sensitivity;
use leptos::prelude::*;
use thaw::*;

fn or_empty(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| EMPTY.to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn MetricDetails() -> impl IntoView {
    let vm = MetricDetailsVm::new();
    let ctx = vm.ctx;

    // a selection can outlive its metric (deleted elsewhere); without data
    // any load failure leaves nothing to show
    let load_failure = move || {
        if vm.metric.data.get().is_some() {
            return None;
        }
        vm.metric.error.get().map(|e| {
            if e.is_not_found() {
                "Metric not found. It may have been deleted.".to_string()
            } else {
                format!("Failed to load metric: {}", e.user_message())
            }
        })
    };

    view! {
        <div class="page">
            <Show
                when=move || vm.metric_id.get().is_some()
                fallback=move || view! {
                    <div class="details-card">
                        <EmptyState text="No metric selected. Pick one in the metric list." />
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| ctx.back_to_list()>
                            "Go to metric list"
                        </Button>
                    </div>
                }
            >
                <Show
                    when=move || load_failure().is_none()
                    fallback=move || view! {
                        <div class="details-card">
                            <ErrorBox message=load_failure().unwrap_or_default() />
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| ctx.back_to_list()>
                                {icon("arrow-left")}
                                " Back to list"
                            </Button>
                        </div>
                    }
                >
                    <QueryStatus is_loading=vm.metric.is_loading error=vm.versions.error />
                    {move || vm.error.get().map(|e| view! { <ErrorBox message=e /> })}
                    {move || vm.notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}
                    {move || vm.metric.data.get().map(|m| {
                        let title = format!("{} · {}", m.name, m.code);
                        view! {
                            <div class="details-card">
                                <div class="details-card__header">
                                    <div>
                                        <h2 class="details-card__title">{title}</h2>
                                        <p class="details-card__subtitle">
                                            {m.description.clone().unwrap_or_else(|| "No description".to_string())}
                                        </p>
                                    </div>
                                    <Flex gap=FlexGap::Small>
                                        <Button
                                            appearance=ButtonAppearance::Secondary
                                            on_click=move |_| vm.request_publish()
                                            disabled=vm.busy
                                        >
                                            {icon("upload")}
                                            " Request publish"
                                        </Button>
                                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| ctx.back_to_list()>
                                            {icon("arrow-left")}
                                            " Back to list"
                                        </Button>
                                    </Flex>
                                </div>
                                <dl class="descriptions">
                                    <dt>"Subject area"</dt><dd>{or_empty(m.subject_area.clone())}</dd>
                                    <dt>"Type"</dt><dd>{m.metric_type.clone()}</dd>
                                    <dt>"Unit"</dt><dd>{or_empty(m.unit.clone())}</dd>
                                    <dt>"Sensitivity"</dt><dd><SensitivityBadge level=m.sensitivity.clone() /></dd>
                                    <dt>"Owner"</dt><dd>{or_empty(m.owner.clone())}</dd>
                                    <dt>"Created"</dt><dd>{format_timestamp(&m.created_at)}</dd>
                                </dl>
                            </div>
                        }
                    })}

                    <div class="details-card">
                        <h3 class="details-section__title">"Basic info"</h3>
                        <div class="form-grid">
                            <TextField label="Name" value=vm.basic.name required=true />
                            <TextField label="Type" value=vm.basic.metric_type required=true />
                            <TextField label="Unit" value=vm.basic.unit />
                            <TextField label="Subject area" value=vm.basic.subject_area />
                            <TextField label="Owner" value=vm.basic.owner />
                            <SelectField
                                label="Sensitivity"
                                value=vm.basic.sensitivity
                                options=options_from(&Sensitivity::ALL.map(|s| s.as_str()))
                            />
                            <TextAreaField label="Description" value=vm.basic.description />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save_basic()
                            disabled=vm.busy
                        >
                            "Save basic info"
                        </Button>
                    </div>

                    <VersionsCard vm=vm />
                    <BindingsCard vm=vm />
                </Show>
            </Show>
        </div>
    }
}
