//! Labelled form fields bound to `RwSignal<String>`.
//!
//! Text inputs go through thaw; selects and dates stay native elements
//! styled with the `form__*` classes.

use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <Input value=value placeholder=placeholder />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form__group form__group--wide">
            <label class="form__label">{label}</label>
            <Textarea value=value placeholder=placeholder />
        </div>
    }
}

/// Native `<select>`; `options` are (value, label) pairs
#[component]
pub fn SelectField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, text)| {
                        let current = val.clone();
                        let is_selected = move || value.get() == current;
                        view! { <option value=val selected=is_selected>{text}</option> }
                    }
                />
            </select>
        </div>
    }
}

/// `YYYY-MM-DD` text kept as typed, parsed on submit
#[component]
pub fn DateField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <input
                type="date"
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Pairs for [`SelectField`] from a static vocabulary
pub fn options_from(values: &[&'static str]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.to_string(), v.to_string())).collect()
}

/// Same as [`options_from`] with a leading "all" entry for filters
pub fn filter_options(all_label: &str, values: &[&'static str]) -> Vec<(String, String)> {
    let mut out = vec![(
        contracts::domain::a001_metric::aggregate::FILTER_ALL.to_string(),
        all_label.to_string(),
    )];
    out.extend(options_from(values));
    out
}
