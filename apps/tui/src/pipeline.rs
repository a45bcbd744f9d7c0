//! Wires fetch results through aggregation, the session cache, the selector
//! and the chart, and drives the page lifecycle.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::aggregate::{aggregate, build_catalog, filter_region};
use crate::cache::{CacheError, SessionCache, SessionStore};
use crate::chart::{series_for, HouseholdChart};
use crate::config::RegionSettings;
use crate::fetch::{DataOrigin, FetchOutcome};
use crate::page::{PageEvent, PageMachine, TransitionError};
use crate::selection::SelectionController;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unable to load household data")]
    NoData,

    #[error("no districts found for region {0:?}")]
    EmptyRegion(String),

    #[error("failed to save session state: {0}")]
    Storage(#[from] CacheError),

    #[error("no data for district {0}")]
    MissingDistrict(String),

    #[error("the chart has not been rendered yet")]
    NotReady,

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Everything the page shows: lifecycle, selector and the chart.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub page: PageMachine,
    pub selector: SelectionController,
    pub chart: Option<HouseholdChart>,
    pub origin: Option<DataOrigin>,
    pub status_message: String,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Takes the page out of `Loading`, into `Ready` with a chart or into `Error`.
///
/// Build failures end in the error page; only an invalid lifecycle transition
/// is returned.
pub async fn setup_dashboard<S: SessionStore>(
    outcome: FetchOutcome,
    cache: &SessionCache<S>,
    dashboard: &mut Dashboard,
    region: &RegionSettings,
    preferred: Option<&str>,
) -> Result<(), TransitionError> {
    dashboard.origin = outcome.origin();

    let event = match build(outcome, cache, dashboard, region, preferred).await {
        Ok(chart) => {
            dashboard.chart = Some(chart);
            dashboard.status_message.clear();
            PageEvent::DataReady
        }
        Err(e) => {
            error!(error = %e, "Dashboard setup failed");
            dashboard.chart = None;
            PageEvent::Failed(e.to_string())
        }
    };

    dashboard.page.process_event(event)?;
    Ok(())
}

async fn build<S: SessionStore>(
    outcome: FetchOutcome,
    cache: &SessionCache<S>,
    dashboard: &mut Dashboard,
    region: &RegionSettings,
    preferred: Option<&str>,
) -> Result<HouseholdChart, PipelineError> {
    let records = outcome.into_records().ok_or(PipelineError::NoData)?;
    let filtered = filter_region(records, &region.marker);
    let catalog = build_catalog(&filtered);
    if catalog.is_empty() {
        return Err(PipelineError::EmptyRegion(region.marker.clone()));
    }
    debug!(records = filtered.len(), districts = catalog.len(), "Filtered records");

    dashboard.selector.populate(&catalog, &region.label_prefix);
    if let Some(key) = preferred {
        if !dashboard.selector.preselect(key) {
            warn!(district = key, "Requested district not found, using the first one");
        }
    }

    cache.save(&aggregate(&filtered)).await?;

    let selected = dashboard
        .selector
        .current_selection()
        .cloned()
        .ok_or(PipelineError::NotReady)?;
    let district = cache
        .district(&selected)
        .await
        .ok_or_else(|| PipelineError::MissingDistrict(selected.clone()))?;

    info!(district = %selected, "Rendering initial chart");
    Ok(HouseholdChart::render(series_for(&district)))
}

/// Re-reads `key` from the cache and pushes its series into the existing chart.
pub async fn refresh_chart<S: SessionStore>(
    cache: &SessionCache<S>,
    dashboard: &mut Dashboard,
    key: &str,
) -> Result<(), PipelineError> {
    let Some(chart) = dashboard.chart.as_mut() else {
        return Err(PipelineError::NotReady);
    };

    let Some(district) = cache.district(key).await else {
        let e = PipelineError::MissingDistrict(key.to_string());
        warn!(error = %e, "Keeping the current chart");
        dashboard.status_message = e.to_string();
        return Err(e);
    };

    let series = series_for(&district);
    chart.update(series.male, series.female);
    dashboard.status_message.clear();
    debug!(district = key, revision = chart.revision(), "Chart updated");
    Ok(())
}
