use crate::layout::views::ViewKey;
use leptos::prelude::*;
use web_sys::window;

/// Что сейчас показано: активный экран и выбранные сущности.
///
/// A version id is only meaningful together with the metric that owns it,
/// so every change of the metric selection (even to the same id) drops the
/// version selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub active_view: ViewKey,
    pub selected_metric_id: Option<i64>,
    pub selected_version_id: Option<i64>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active_view: ViewKey::Dashboard,
            selected_metric_id: None,
            selected_version_id: None,
        }
    }
}

impl NavigationState {
    pub fn with_active_view(self, view: ViewKey) -> Self {
        Self {
            active_view: view,
            ..self
        }
    }

    pub fn with_selected_metric(self, metric_id: Option<i64>) -> Self {
        Self {
            selected_metric_id: metric_id,
            selected_version_id: None,
            ..self
        }
    }

    pub fn with_selected_version(self, version_id: Option<i64>) -> Self {
        Self {
            selected_version_id: version_id,
            ..self
        }
    }
}

/// Process-wide navigation store, provided once via context in `App`.
///
/// The whole [`NavigationState`] lives in one signal: every setter swaps the
/// value in a single `update`, so a render pass never observes a metric id
/// from one write next to a version id from another.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub nav: RwSignal<NavigationState>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self::with_state(NavigationState::default())
    }

    pub fn with_state(state: NavigationState) -> Self {
        Self {
            nav: RwSignal::new(state),
            left_open: RwSignal::new(true),
        }
    }

    /// Reads `?view=<key>` once at startup. The URL is never written back, so
    /// a reload without the parameter starts on the dashboard again.
    pub fn init_from_location(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: std::collections::HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(raw) = params.get("view") {
            let view = ViewKey::from_key(raw);
            log::debug!("initial view from location: '{}' -> {}", raw, view.as_str());
            self.set_active_view(view);
        }
    }

    pub fn snapshot(&self) -> NavigationState {
        self.nav.get()
    }

    pub fn active_view(&self) -> ViewKey {
        self.nav.with(|s| s.active_view)
    }

    pub fn selected_metric_id(&self) -> Option<i64> {
        self.nav.with(|s| s.selected_metric_id)
    }

    pub fn selected_version_id(&self) -> Option<i64> {
        self.nav.with(|s| s.selected_version_id)
    }

    pub fn set_active_view(&self, view: ViewKey) {
        log::debug!("active view -> {}", view.as_str());
        self.nav.update(|s| *s = s.with_active_view(view));
    }

    pub fn set_selected_metric_id(&self, metric_id: Option<i64>) {
        log::debug!("selected metric -> {:?}", metric_id);
        self.nav.update(|s| *s = s.with_selected_metric(metric_id));
    }

    pub fn set_selected_version_id(&self, version_id: Option<i64>) {
        self.nav.update(|s| *s = s.with_selected_version(version_id));
    }

    /// Select a metric and show its detail screen in one swap
    pub fn open_metric(&self, metric_id: i64) {
        self.nav.update(|s| {
            *s = s
                .with_selected_metric(Some(metric_id))
                .with_active_view(ViewKey::MetricDetail)
        });
    }

    /// Clear the metric context and go back to the list
    pub fn back_to_list(&self) {
        self.nav.update(|s| {
            *s = s
                .with_selected_metric(None)
                .with_active_view(ViewKey::MetricList)
        });
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let s = NavigationState::default();
        assert_eq!(s.active_view, ViewKey::Dashboard);
        assert_eq!(s.selected_metric_id, None);
        assert_eq!(s.selected_version_id, None);
    }

    #[test]
    fn test_selecting_metric_always_clears_version() {
        let base = NavigationState::default()
            .with_selected_metric(Some(7))
            .with_selected_version(Some(11));
        assert_eq!(base.selected_version_id, Some(11));

        // same id again still resets
        assert_eq!(base.with_selected_metric(Some(7)).selected_version_id, None);
        // different id
        assert_eq!(base.with_selected_metric(Some(8)).selected_version_id, None);
        // clearing
        let cleared = base.with_selected_metric(None);
        assert_eq!(cleared.selected_metric_id, None);
        assert_eq!(cleared.selected_version_id, None);
    }

    #[test]
    fn test_selection_coupling_over_call_sequences() {
        let metric_ids = [None, Some(1), Some(2), Some(1)];
        let version_ids = [None, Some(10), Some(20)];
        let views = ViewKey::ALL;

        for (i, metric) in metric_ids.iter().enumerate() {
            for version in version_ids.iter() {
                let mut s = NavigationState::default()
                    .with_active_view(views[i % views.len()])
                    .with_selected_metric(Some(99))
                    .with_selected_version(*version)
                    .with_active_view(views[(i + 3) % views.len()]);
                s = s.with_selected_metric(*metric);
                assert_eq!(s.selected_version_id, None);
                assert_eq!(s.selected_metric_id, *metric);
            }
        }
    }

    #[test]
    fn test_active_view_does_not_touch_selection() {
        let s = NavigationState::default()
            .with_selected_metric(Some(3))
            .with_selected_version(Some(4))
            .with_active_view(ViewKey::Caliber);
        assert_eq!(s.active_view, ViewKey::Caliber);
        assert_eq!(s.selected_metric_id, Some(3));
        assert_eq!(s.selected_version_id, Some(4));
    }

    #[test]
    fn test_version_setter_keeps_metric_and_view() {
        let s = NavigationState::default()
            .with_active_view(ViewKey::MetricDetail)
            .with_selected_metric(Some(3))
            .with_selected_version(Some(4))
            .with_selected_version(None);
        assert_eq!(s.active_view, ViewKey::MetricDetail);
        assert_eq!(s.selected_metric_id, Some(3));
        assert_eq!(s.selected_version_id, None);
    }
}
