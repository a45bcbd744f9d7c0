use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use crate::cache::{CacheError, SessionCache, SessionStore, SqliteStore};
use crate::config::AppConfig;
use crate::domain::DistrictKey;
use crate::fetch::FetchOutcome;
use crate::page::TransitionError;
use crate::pipeline::{refresh_chart, setup_dashboard, Dashboard};

#[derive(Debug)]
pub struct App<S = SqliteStore> {
    pub running: bool,
    pub show_help: bool,
    pub dropdown_open: bool,
    pub dashboard: Dashboard,
    pub cache: SessionCache<S>,
    pub config: AppConfig,
    pub throbber_state: ThrobberState,
    changes: UnboundedReceiver<DistrictKey>,
}

impl App<SqliteStore> {
    /// Opens a fresh session store as configured.
    pub async fn new(config: AppConfig) -> Result<Self, CacheError> {
        let store = SqliteStore::open(config.session_db.as_deref()).await?;
        Ok(Self::with_cache(config, SessionCache::new(store)))
    }
}

impl<S: SessionStore> App<S> {
    pub fn with_cache(config: AppConfig, cache: SessionCache<S>) -> Self {
        let (tx, changes) = mpsc::unbounded_channel();
        let mut dashboard = Dashboard::new();
        dashboard.selector.on_change(move |key| {
            if tx.send(key.clone()).is_err() {
                debug!(district = %key, "Selection change dropped, app is gone");
            }
        });

        Self {
            running: true,
            show_help: false,
            dropdown_open: false,
            dashboard,
            cache,
            config,
            throbber_state: ThrobberState::default(),
            changes,
        }
    }

    /// Advances the loading animation.
    pub fn update(&mut self) {
        if self.dashboard.page.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    pub async fn finish_loading(&mut self, outcome: FetchOutcome) -> Result<(), TransitionError> {
        setup_dashboard(
            outcome,
            &self.cache,
            &mut self.dashboard,
            &self.config.region,
            self.config.initial_district.as_deref(),
        )
        .await
    }

    /// Refreshes the chart for every selection change reported since the last call.
    pub async fn apply_pending_changes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(key) = self.changes.try_recv() {
            match refresh_chart(&self.cache, &mut self.dashboard, &key).await {
                Ok(()) => applied += 1,
                Err(e) => warn!(district = %key, error = %e, "Chart refresh failed"),
            }
        }
        applied
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
