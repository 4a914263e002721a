//! Top bar: sidebar toggle, breadcrumb of the current view, environment tag.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_config;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();
    let breadcrumb = move || ctx.active_view().label();
    let api_base = api_config().base_url.clone();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Metric Management Center"</span>
                <span class="top-header__breadcrumb">" / "{breadcrumb}</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__env" title=api_base>"ENV: DEV"</span>
                <div class="top-header__avatar">"QX"</div>
            </div>
        </div>
    }
}
