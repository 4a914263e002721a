use serde::{Deserialize, Serialize};

/// Response of `dashboard/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: OverviewStats,
    pub task_summary: TaskSummary,
    #[serde(default)]
    pub uploads: Vec<UploadBatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub registered_metrics: RegisteredMetrics,
    pub active_versions: ActiveVersions,
    pub yesterday_jobs: YesterdayJobs,
    pub recent_uploads: RecentUploads,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisteredMetrics {
    pub total: i64,
    pub sensitive: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveVersions {
    pub total: i64,
    pub released_this_week: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YesterdayJobs {
    pub total: i64,
    pub failed: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentUploads {
    pub total: i64,
    pub processing: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBatch {
    pub batch_id: String,
    pub source: String,
    pub filename: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_camel_case_wire_names() {
        let overview: DashboardOverview = serde_json::from_value(serde_json::json!({
            "stats": {
                "registeredMetrics": {"total": 128, "sensitive": 34},
                "activeVersions": {"total": 52, "releasedThisWeek": 3},
                "yesterdayJobs": {"total": 86, "failed": 2},
                "recentUploads": {"total": 5, "processing": 1}
            },
            "taskSummary": {"title": "Last 7 days", "description": "..."},
            "uploads": [
                {"batchId": "B20250101", "source": "manual", "filename": "gmv_2024Q4.csv", "status": "done"}
            ]
        }))
        .unwrap();
        assert_eq!(overview.stats.active_versions.released_this_week, 3);
        assert_eq!(overview.uploads[0].batch_id, "B20250101");
    }
}
