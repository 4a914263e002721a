use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Error,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Success => "stat-card stat-card--success",
            StatTone::Warning => "stat-card stat-card--warning",
            StatTone::Error => "stat-card stat-card--error",
        }
    }
}

/// Groups digits with a narrow no-break space: 12345 -> "12 345"
pub fn format_count(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// None while loading or on error
    #[prop(into)]
    value: Signal<Option<i64>>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
    #[prop(into, optional)] tone: Signal<StatTone>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_count(v),
        None => "—".to_string(),
    };

    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! {
                    <div class="stat-card__subtitle">{s}</div>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12345), "12\u{00a0}345");
        assert_eq!(format_count(-1000), "-1\u{00a0}000");
    }
}
