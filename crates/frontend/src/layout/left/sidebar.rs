//! Flat navigation menu, one entry per view.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::views::ViewKey;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">"MetricOne"</div>
            {ViewKey::ALL.into_iter().map(|key| {
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.active_view() == key
                        style:padding-left="12px"
                        on:click=move |_| ctx.set_active_view(key)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(key.icon())}
                            <span>{key.label()}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
