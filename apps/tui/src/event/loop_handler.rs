use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::app::{handle_input, App};
use crate::cache::SessionStore;
use crate::chart::series_for;
use crate::domain::Count;
use crate::fetch::{DataFetcher, DataOrigin, FetchOutcome};
use crate::page::PageState;
use crate::terminal::Tui;
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the dashboard until the user quits.
///
/// The fetch runs on its own task so the loading screen keeps animating.
pub async fn run<S: SessionStore>(terminal: &mut Tui, app: &mut App<S>) -> Result<()> {
    let fetcher = DataFetcher::from_config(&app.config)?;
    let mut fetch: Option<JoinHandle<FetchOutcome>> =
        Some(tokio::spawn(async move { fetcher.fetch().await }));

    while app.running {
        app.update();

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        if fetch.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = fetch.take() {
                let outcome = handle.await.unwrap_or_else(|e| {
                    error!(error = %e, "Fetch task did not complete");
                    FetchOutcome::Failed
                });
                if let Err(e) = app.finish_loading(outcome).await {
                    warn!(error = %e, "Ignoring page transition");
                }
            }
        }

        if matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    // Redrawn at the top of the loop
                }
                Ok(_) | Err(_) => {}
            }
        }

        app.apply_pending_changes().await;
    }

    if let Some(handle) = fetch {
        handle.abort();
    }
    Ok(())
}

/// Run the pipeline once and print the result instead of drawing it.
pub async fn run_headless<S: SessionStore>(app: &mut App<S>, json: bool) -> Result<()> {
    let fetcher = DataFetcher::from_config(&app.config)?;
    let outcome = fetcher.fetch().await;
    app.finish_loading(outcome).await?;

    if let PageState::Error(msg) = app.dashboard.page.state() {
        return Err(eyre!("{msg}"));
    }

    let report = build_headless_report(app).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_table(&report);
    }

    Ok(())
}

fn render_headless_table(report: &HeadlessReport) {
    println!("\nTaipei Household Statistics");
    println!("===========================");
    if let Some(origin) = report.origin {
        println!("Source: {}", origin.label());
    }
    println!("Columns: 男 共同生活戶 / 獨立生活戶 | 女 共同生活戶 / 獨立生活戶\n");

    for district in &report.districts {
        let marker = if report.selected.as_deref() == Some(district.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {} | {} / {} | {} / {}",
            district.label, district.male[0], district.male[1], district.female[0], district.female[1]
        );
    }
}

/// Districts in selector order with their cached series.
pub async fn build_headless_report<S: SessionStore>(app: &App<S>) -> HeadlessReport {
    let districts = app.cache.load().await.unwrap_or_default();
    let selector = &app.dashboard.selector;

    HeadlessReport {
        origin: app.dashboard.origin,
        selected: selector.current_selection().cloned(),
        districts: selector
            .options()
            .iter()
            .filter_map(|option| {
                let series = series_for(districts.get(&option.id)?);
                Some(HeadlessDistrict {
                    id: option.id.clone(),
                    label: option.text.clone(),
                    male: series.male,
                    female: series.female,
                })
            })
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub origin: Option<DataOrigin>,
    pub selected: Option<String>,
    pub districts: Vec<HeadlessDistrict>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessDistrict {
    pub id: String,
    pub label: String,
    pub male: [Count; 2],
    pub female: [Count; 2],
}
