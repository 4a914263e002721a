/// Closed set of top-level screens. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    Dashboard,
    MetricList,
    MetricDetail,
    Caliber,
    Dimension,
    Version,
    Upload,
    Jobs,
    System,
}

impl ViewKey {
    /// Sidebar order
    pub const ALL: [ViewKey; 9] = [
        ViewKey::Dashboard,
        ViewKey::MetricList,
        ViewKey::MetricDetail,
        ViewKey::Caliber,
        ViewKey::Dimension,
        ViewKey::Version,
        ViewKey::Upload,
        ViewKey::Jobs,
        ViewKey::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKey::Dashboard => "dashboard",
            ViewKey::MetricList => "metric-list",
            ViewKey::MetricDetail => "metric-detail",
            ViewKey::Caliber => "caliber",
            ViewKey::Dimension => "dimension",
            ViewKey::Version => "version",
            ViewKey::Upload => "upload",
            ViewKey::Jobs => "jobs",
            ViewKey::System => "system",
        }
    }

    /// Parse an external tag; anything unknown lands on the dashboard.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == key)
            .unwrap_or(ViewKey::Dashboard)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKey::Dashboard => "Dashboard",
            ViewKey::MetricList => "Metrics",
            ViewKey::MetricDetail => "Metric detail",
            ViewKey::Caliber => "Caliber library",
            ViewKey::Dimension => "Dimensions",
            ViewKey::Version => "Versions",
            ViewKey::Upload => "Data upload",
            ViewKey::Jobs => "Compute jobs",
            ViewKey::System => "System & access",
        }
    }

    /// Icon name for `shared::icons::icon`
    pub fn icon(&self) -> &'static str {
        match self {
            ViewKey::Dashboard => "dashboard",
            ViewKey::MetricList => "list",
            ViewKey::MetricDetail => "profile",
            ViewKey::Caliber => "database",
            ViewKey::Dimension => "partition",
            ViewKey::Version => "layers",
            ViewKey::Upload => "upload",
            ViewKey::Jobs => "calendar",
            ViewKey::System => "settings",
        }
    }
}

impl Default for ViewKey {
    fn default() -> Self {
        ViewKey::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_parse_to_themselves() {
        for view in ViewKey::ALL {
            assert_eq!(ViewKey::from_key(view.as_str()), view);
        }
    }

    #[test]
    fn test_unknown_keys_fall_back_to_dashboard() {
        for raw in ["", "metrics", "Metric-List", "metric_list", "admin", " dashboard"] {
            assert_eq!(ViewKey::from_key(raw), ViewKey::Dashboard, "key {:?}", raw);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = ViewKey::ALL.iter().map(|v| v.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }
}
