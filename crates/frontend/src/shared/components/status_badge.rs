use leptos::prelude::*;
use thaw::*;

fn status_color(status: &str) -> BadgeColor {
    match status {
        "active" => BadgeColor::Success,
        "draft" => BadgeColor::Warning,
        "pending_review" => BadgeColor::Brand,
        "deprecated" | "inactive" => BadgeColor::Subtle,
        "failed" | "error" => BadgeColor::Danger,
        _ => BadgeColor::Informative,
    }
}

fn sensitivity_color(level: &str) -> BadgeColor {
    match level {
        "secret" => BadgeColor::Danger,
        "confidential" => BadgeColor::Warning,
        _ => BadgeColor::Success,
    }
}

/// Lifecycle status of a version, binding or upload batch
#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let color = status_color(&status);
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status}
        </Badge>
    }
}

#[component]
pub fn SensitivityBadge(#[prop(into)] level: String) -> impl IntoView {
    let color = sensitivity_color(&level);
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {level}
        </Badge>
    }
}
