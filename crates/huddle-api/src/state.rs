use std::sync::Arc;

use huddle_assessments::assessment::AssessmentService;
use huddle_assessments::participation::ParticipationService;
use huddle_storage::store::DocumentStore;

use crate::config::AppConfig;
use crate::notify::CompletionNotifier;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assessments: AssessmentService,
    pub participations: ParticipationService,
    pub notifier: Arc<dyn CompletionNotifier>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        let root_url = config.root_url();
        Self {
            assessments: AssessmentService::new(store.clone()),
            participations: ParticipationService::new(store, root_url),
            config: Arc::new(config),
            notifier,
        }
    }
}
