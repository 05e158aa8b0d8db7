mod utils;
use utils::*;

use burstload::prelude::*;
use burstload::report::write_html_report;
use std::time::Duration;

#[tokio::test]
#[ntest::timeout(30_000)]
async fn successful_calls_are_all_recorded() {
    let addr = init().await.unwrap();

    let outcome = LoadTest::new(format!("http://{addr}/delay/ms/5"))
        .concurrency(4)
        .burst_size(3)
        .duration(Duration::from_millis(200))
        .pace(Duration::from_millis(50))
        .await
        .unwrap();
    let summary = outcome.summary;

    assert!(outcome.bursts >= 1);
    assert_eq!(summary.total_iterations, 12 * outcome.bursts);
    assert_eq!(summary.sample_count, summary.total_iterations);
    assert_eq!(summary.failure_count, 0);
    assert_eq!(summary.error_percentage, 0.);
    assert!(summary.mean_latency >= 0.005, "{summary}");
    assert!(summary.p90_latency <= summary.p99_latency);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn error_statuses_count_as_failures() {
    let addr = init().await.unwrap();

    let outcome = LoadTest::new(format!("http://{addr}/status/503"))
        .concurrency(3)
        .burst_size(2)
        .duration(Duration::from_millis(1))
        .await
        .unwrap();

    assert!(outcome.bursts >= 1);
    assert_eq!(outcome.summary.sample_count, 6 * outcome.bursts);
    assert_eq!(outcome.summary.failure_count, outcome.summary.sample_count);
    assert_eq!(outcome.summary.error_percentage, 100.);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn refused_connections_do_not_abort_the_run() {
    let _ = init().await.unwrap();
    let addr = closed_addr();

    let outcome = LoadTest::new(format!("http://{addr}/"))
        .concurrency(2)
        .burst_size(2)
        .duration(Duration::from_millis(100))
        .pace(Duration::from_millis(20))
        .await
        .unwrap();
    let summary = outcome.summary;

    assert_eq!(summary.sample_count, summary.total_iterations);
    assert_eq!(summary.failure_count, summary.sample_count);
    assert_eq!(summary.error_percentage, 100.);
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn rate_limited_target_reports_partial_errors() {
    let addr = init().await.unwrap();

    let outcome = LoadTest::new(format!(
        "http://{addr}/max/5/delay/ms/2/scenario/partial-errors"
    ))
    .concurrency(10)
    .burst_size(1)
    .duration(Duration::from_millis(1))
    .await
    .unwrap();
    let summary = outcome.summary;

    assert_eq!(summary.total_iterations, 10);
    assert!(summary.failure_count > 0 && summary.failure_count < 10, "{summary}");
    assert_eq!(
        summary.error_percentage,
        100. * summary.failure_count as f64 / 10.
    );
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn unsupported_method_is_rejected() {
    let addr = init().await.unwrap();

    let res = LoadTest::new(format!("http://{addr}/delay/ms/1"))
        .method("post")
        .duration(Duration::from_secs(1))
        .await;

    assert!(matches!(res, Err(ConfigError::UnsupportedMethod(_))));
}

#[tokio::test]
#[ntest::timeout(30_000)]
async fn report_from_a_real_run() {
    let addr = init().await.unwrap();
    let endpoint = format!("http://{addr}/delay/ms/1");

    let outcome = LoadTest::new(endpoint.clone())
        .concurrency(2)
        .duration(Duration::from_millis(1))
        .await
        .unwrap();

    let path = std::env::temp_dir().join(format!(
        "burstload-integration-{}.html",
        std::process::id()
    ));
    write_html_report(&path, &endpoint, &outcome.summary).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(html.contains(&endpoint));
    assert!(html.contains("<tr><td>Number of Iterations</td><td>2</td></tr>"));
}
