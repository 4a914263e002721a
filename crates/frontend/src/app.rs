use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::query::QueryClient;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Navigation store, seeded from `?view=` when present.
    let ctx = AppGlobalContext::new();
    ctx.init_from_location();
    provide_context(ctx);

    // One query cache for every view.
    provide_context(QueryClient::new());

    view! {
        <AppShell />
    }
}
