use crate::shared::api_utils::ApiError;
use leptos::prelude::*;
use thaw::*;

/// Spinner while the first load runs, error box when it failed.
#[component]
pub fn QueryStatus(
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(optional)] loading_text: Option<&'static str>,
) -> impl IntoView {
    let loading_text = loading_text.unwrap_or("Loading...");
    view! {
        <Show when=move || is_loading.get()>
            <div class="query-status query-status--loading">
                <Spinner size=SpinnerSize::Small />
                <span>{loading_text}</span>
            </div>
        </Show>
        {move || error.get().map(|e| view! { <ErrorBox message=e.user_message() /> })}
    }
}

#[component]
pub fn ErrorBox(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--error">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">{message}</span>
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] text: String) -> impl IntoView {
    view! { <div class="empty-state">{text}</div> }
}
