use super::super::form::{MetricFields, MetricForm, VersionFields, VersionForm};
use crate::domain::a001_metric::api::{
    create_version, delete_version, request_publish, update_metric, update_version,
    use_metric_detail, use_metric_versions,
};
use crate::domain::a002_caliber::api::{
    create_binding, delete_binding, update_binding, use_calibers, use_version_calibers,
};
use crate::domain::a002_caliber::ui::binding_form::{BindingFields, BindingForm};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::ApiError;
use crate::shared::query::{use_query_client, QueryClient, QueryResult};
use contracts::domain::a001_metric::aggregate::{Metric, MetricVersion};
use contracts::domain::a002_caliber::aggregate::{Caliber, VersionCaliber};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Version whose bindings are shown: the stored selection when it belongs to
/// this metric, otherwise the latest (first) version.
pub fn resolve_current_version(versions: &[MetricVersion], selected: Option<i64>) -> Option<i64> {
    match selected {
        Some(id) if versions.iter().any(|v| v.id == id) => Some(id),
        _ => versions.first().map(|v| v.id),
    }
}

#[derive(Clone, Copy)]
pub struct MetricDetailsVm {
    pub ctx: AppGlobalContext,
    client: QueryClient,
    pub metric_id: Signal<Option<i64>>,
    pub metric: QueryResult<Metric>,
    pub versions: QueryResult<Vec<MetricVersion>>,
    pub calibers: QueryResult<Vec<Caliber>>,
    pub current_version_id: Signal<Option<i64>>,
    pub bindings: QueryResult<Vec<VersionCaliber>>,

    pub basic: MetricFields,
    pub new_version: VersionFields,
    pub edit_version: VersionFields,
    pub editing_version: RwSignal<Option<i64>>,

    pub new_binding: BindingFields,
    pub binding_dialog_open: RwSignal<bool>,
    pub edit_binding: BindingFields,
    pub editing_binding: RwSignal<Option<VersionCaliber>>,
    pub binding_edit_open: RwSignal<bool>,

    pub busy: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
}

impl MetricDetailsVm {
    pub fn new() -> Self {
        let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
        let client = use_query_client();

        let metric_id = Signal::derive(move || ctx.selected_metric_id());
        let metric = use_metric_detail(metric_id);
        let versions = use_metric_versions(metric_id);
        let calibers = use_calibers();

        let current = Memo::new(move |_| {
            let list = versions.data.get().unwrap_or_default();
            resolve_current_version(&list, ctx.selected_version_id())
        });
        let current_version_id = Signal::from(current);
        let bindings = use_version_calibers(metric_id, current_version_id);

        let vm = Self {
            ctx,
            client,
            metric_id,
            metric,
            versions,
            calibers,
            current_version_id,
            bindings,
            basic: MetricFields::new(),
            new_version: VersionFields::new(),
            edit_version: VersionFields::new(),
            editing_version: RwSignal::new(None),
            new_binding: BindingFields::new(),
            binding_dialog_open: RwSignal::new(false),
            edit_binding: BindingFields::new(),
            editing_binding: RwSignal::new(None),
            binding_edit_open: RwSignal::new(false),
            busy: RwSignal::new(false),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
        };

        // keep the basic form in sync with the server copy
        let basic = vm.basic;
        Effect::new(move |_| {
            if let Some(m) = metric.data.get() {
                basic.load(MetricForm::from_metric(&m));
            }
        });

        vm
    }

    pub fn current_version(&self) -> Option<MetricVersion> {
        let id = self.current_version_id.get()?;
        self.versions
            .data
            .get()
            .and_then(|list| list.into_iter().find(|v| v.id == id))
    }

    /// Run a write, reporting the outcome in `error` / `notice`.
    fn run<F, Fut, T>(&self, success: &'static str, job: F)
    where
        F: FnOnce(QueryClient) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        T: 'static,
    {
        let (busy, error, notice, client) = (self.busy, self.error, self.notice, self.client);
        busy.set(true);
        error.set(None);
        notice.set(None);
        spawn_local(async move {
            match job(client).await {
                Ok(_) => notice.set(Some(success.to_string())),
                Err(e) => {
                    log::warn!("write failed ({}): {}", success, e);
                    error.set(Some(e.user_message()));
                }
            }
            busy.set(false);
        });
    }

    fn reject(&self, e: ApiError) {
        self.error.set(Some(e.user_message()));
    }

    pub fn save_basic(&self) {
        let Some(id) = self.metric_id.get_untracked() else {
            return;
        };
        match self.basic.snapshot().to_update_dto() {
            Ok(dto) => self.run("Basic info saved", move |c| update_metric(c, id, dto)),
            Err(e) => self.reject(e),
        }
    }

    pub fn create_version(&self) {
        let Some(id) = self.metric_id.get_untracked() else {
            return;
        };
        match self.new_version.snapshot().to_create_dto() {
            Ok(dto) => {
                let form = self.new_version;
                self.run("New version created", move |c| async move {
                    let created = create_version(c, id, dto).await?;
                    form.reset();
                    Ok::<_, ApiError>(created)
                });
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn select_version(&self, version_id: i64) {
        self.ctx.set_selected_version_id(Some(version_id));
    }

    /// Toggle the inline editor of a version row
    pub fn toggle_edit_version(&self, v: &MetricVersion) {
        if self.editing_version.get_untracked() == Some(v.id) {
            self.editing_version.set(None);
        } else {
            self.edit_version.load(VersionForm::from_version(v));
            self.editing_version.set(Some(v.id));
        }
    }

    pub fn save_version(&self) {
        let (Some(metric_id), Some(version_id)) = (
            self.metric_id.get_untracked(),
            self.editing_version.get_untracked(),
        ) else {
            return;
        };
        match self.edit_version.snapshot().to_update_dto() {
            Ok(dto) => {
                let editing = self.editing_version;
                self.run("Version updated", move |c| async move {
                    let saved = update_version(c, metric_id, version_id, dto).await?;
                    editing.set(None);
                    Ok::<_, ApiError>(saved)
                });
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn delete_version(&self, version_id: i64) {
        let Some(metric_id) = self.metric_id.get_untracked() else {
            return;
        };
        let ctx = self.ctx;
        self.run("Version deleted", move |c| async move {
            delete_version(c, metric_id, version_id).await?;
            if ctx.selected_version_id() == Some(version_id) {
                ctx.set_selected_version_id(None);
            }
            Ok::<_, ApiError>(())
        });
    }

    pub fn request_publish(&self) {
        let Some(id) = self.metric_id.get_untracked() else {
            return;
        };
        self.run("Publish requested", move |c| request_publish(c, id));
    }

    pub fn open_new_binding(&self) {
        self.new_binding.reset();
        self.binding_dialog_open.set(true);
    }

    pub fn save_new_binding(&self) {
        let (Some(metric_id), Some(version_id)) = (
            self.metric_id.get_untracked(),
            self.current_version_id.get_untracked(),
        ) else {
            return;
        };
        match self.new_binding.snapshot().to_create_dto() {
            Ok(dto) => {
                let open = self.binding_dialog_open;
                self.run("Caliber bound", move |c| async move {
                    let created = create_binding(c, metric_id, version_id, dto).await?;
                    open.set(false);
                    Ok::<_, ApiError>(created)
                });
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn start_edit_binding(&self, binding: VersionCaliber) {
        self.edit_binding.load(BindingForm::from_binding(&binding));
        self.editing_binding.set(Some(binding));
        self.binding_edit_open.set(true);
    }

    pub fn save_binding(&self) {
        let (Some(metric_id), Some(version_id), Some(binding)) = (
            self.metric_id.get_untracked(),
            self.current_version_id.get_untracked(),
            self.editing_binding.get_untracked(),
        ) else {
            return;
        };
        match self.edit_binding.snapshot().to_update_dto() {
            Ok(dto) => {
                let open = self.binding_edit_open;
                self.run("Binding updated", move |c| async move {
                    let saved = update_binding(c, metric_id, version_id, binding.id, dto).await?;
                    open.set(false);
                    Ok::<_, ApiError>(saved)
                });
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn delete_binding(&self, binding_id: i64) {
        let (Some(metric_id), Some(version_id)) = (
            self.metric_id.get_untracked(),
            self.current_version_id.get_untracked(),
        ) else {
            return;
        };
        self.run("Caliber removed", move |c| {
            delete_binding(c, metric_id, version_id, binding_id)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: i64) -> MetricVersion {
        serde_json::from_value(serde_json::json!({
            "id": id, "metric_id": 7, "status": "draft", "created_at": "x"
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_current_version() {
        let versions = vec![version(12), version(11)];
        assert_eq!(resolve_current_version(&versions, None), Some(12));
        assert_eq!(resolve_current_version(&versions, Some(11)), Some(11));
        // selection left over from another metric
        assert_eq!(resolve_current_version(&versions, Some(99)), Some(12));
        assert_eq!(resolve_current_version(&[], Some(11)), None);
    }
}
