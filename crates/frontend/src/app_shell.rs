//! Root layout: sidebar on the left, the active view in the content area.

use crate::layout::left::sidebar::Sidebar;
use crate::layout::views::ViewRenderer;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <ViewRenderer /> }.into_any()
        />
    }
}
