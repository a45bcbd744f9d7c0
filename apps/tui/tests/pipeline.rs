use std::io::Write;
use std::path::Path;
use std::time::Duration;

use taipei_households::app::App;
use taipei_households::cache::{MemoryStore, SessionCache, SqliteStore};
use taipei_households::config::{default_fallback_path, AppConfig};
use taipei_households::domain::{Count, Envelope, RawRecord};
use taipei_households::fetch::{DataFetcher, DataOrigin, Source};
use taipei_households::page::PageState;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn snapshot(records: Vec<RawRecord>) -> Result<tempfile::NamedTempFile, Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(serde_json::to_string(&Envelope::new(records))?.as_bytes())?;
    Ok(file)
}

fn taipei_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("臺北市中正區", ["5", "2", "4", "1"]),
        RawRecord::new("臺北市中正區", ["3", "0", "2", "0"]),
        RawRecord::new("臺北市大安區", ["40", "12", "38", "15"]),
        RawRecord::new("新北市板橋區", ["9", "9", "9", "9"]),
    ]
}

fn unreachable_primary() -> Result<Source, Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;
    Ok(Source::http(client, "http://127.0.0.1:9/api/v1/rest/datastore"))
}

fn app() -> App<MemoryStore> {
    App::with_cache(AppConfig::default(), SessionCache::new(MemoryStore::new()))
}

#[tokio::test]
async fn primary_failure_falls_back_and_renders() -> TestResult {
    let fallback = snapshot(taipei_records())?;
    let fetcher = DataFetcher::new(unreachable_primary()?, Source::file(fallback.path()));

    let mut app = app();
    app.finish_loading(fetcher.fetch().await).await?;

    assert_eq!(app.dashboard.page.state(), &PageState::Ready);
    assert_eq!(app.dashboard.origin, Some(DataOrigin::Fallback));
    assert!(app.dashboard.chart.is_some());
    Ok(())
}

#[tokio::test]
async fn both_sources_failing_shows_error_without_chart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let fetcher = DataFetcher::new(
        unreachable_primary()?,
        Source::file(dir.path().join("apiData.json")),
    );

    let mut app = app();
    app.finish_loading(fetcher.fetch().await).await?;

    assert!(matches!(app.dashboard.page.state(), PageState::Error(_)));
    assert!(app.dashboard.chart.is_none());
    assert!(app.cache.load().await.is_none());
    Ok(())
}

#[tokio::test]
async fn zhongzheng_is_aggregated_and_charted() -> TestResult {
    let primary = snapshot(taipei_records())?;
    let fetcher = DataFetcher::new(Source::file(primary.path()), Source::file(primary.path()));

    let mut app = app();
    app.finish_loading(fetcher.fetch().await).await?;

    let keys: Vec<&str> = app
        .dashboard
        .selector
        .options()
        .iter()
        .map(|option| option.id.as_str())
        .collect();
    assert_eq!(keys, ["臺北市中正區", "臺北市大安區"]);

    let series = app.dashboard.chart.as_ref().map(|chart| chart.series());
    assert_eq!(series.map(|s| s.male), Some([Count::new(8), Count::new(2)]));
    assert_eq!(series.map(|s| s.female), Some([Count::new(6), Count::new(1)]));
    Ok(())
}

#[tokio::test]
async fn switching_district_updates_the_same_chart() -> TestResult {
    let primary = snapshot(taipei_records())?;
    let fetcher = DataFetcher::new(Source::file(primary.path()), Source::file(primary.path()));
    let store = SqliteStore::open(None).await?;

    let mut app = App::with_cache(AppConfig::default(), SessionCache::new(store));
    app.finish_loading(fetcher.fetch().await).await?;
    let id = app.dashboard.chart.as_ref().map(|chart| chart.id());

    assert!(app.dashboard.selector.select_key("臺北市大安區"));
    assert_eq!(app.apply_pending_changes().await, 1);

    let chart = app.dashboard.chart.as_ref();
    assert_eq!(chart.map(|chart| chart.id()), id);
    assert_eq!(chart.map(|chart| chart.revision()), Some(1));
    assert_eq!(
        chart.map(|chart| chart.series().male),
        Some([Count::new(40), Count::new(12)])
    );
    assert_eq!(app.dashboard.page.state(), &PageState::Ready);
    Ok(())
}

#[tokio::test]
async fn bundled_snapshot_covers_all_taipei_districts() -> TestResult {
    let path = default_fallback_path();
    assert!(Path::new(&path).exists());

    let records = Source::file(&path).load().await?;
    let mut app = app();
    app.finish_loading(taipei_households::fetch::FetchOutcome::Fallback(records))
        .await?;

    assert_eq!(app.dashboard.page.state(), &PageState::Ready);
    assert_eq!(app.dashboard.selector.options().len(), 12);
    assert!(app
        .dashboard
        .selector
        .options()
        .iter()
        .all(|option| !option.text.starts_with("臺北市")));
    Ok(())
}
