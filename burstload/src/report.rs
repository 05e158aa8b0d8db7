//! HTML rendering of a run's [`MetricsSummary`].
use burstload_core::MetricsSummary;
use std::path::Path;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::info;

/// Where the CLI writes the report unless told otherwise.
pub const DEFAULT_REPORT_PATH: &str = "api_test_report.html";

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const STYLE: &str = r#"
    body {
        font-family: Arial, Helvetica, sans-serif;
        line-height: 1.6;
        margin: 20px;
    }
    h1 {
        text-align: center;
    }
    table {
        width: 100%;
        border-collapse: collapse;
        margin-top: 20px;
    }
    table, th, td {
        border: 1px solid #ddd;
    }
    th, td {
        padding: 8px;
        text-align: left;
    }
    th {
        background-color: #f2f2f2;
    }
"#;

/// Local time when the offset can be determined, UTC otherwise.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn render_html(
    endpoint: &str,
    summary: &MetricsSummary,
    timestamp: OffsetDateTime,
) -> String {
    let date = timestamp
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string());

    let rows = [
        ("Number of Iterations", summary.total_iterations.to_string()),
        (
            "Average Response Time (s)",
            format!("{:.4}", summary.mean_latency),
        ),
        (
            "90th Percentile Response Time (s)",
            format!("{:.4}", summary.p90_latency),
        ),
        (
            "99th Percentile Response Time (s)",
            format!("{:.4}", summary.p99_latency),
        ),
        ("Error Percentage", format!("{:.2}", summary.error_percentage)),
    ];

    let rows: String = rows
        .iter()
        .map(|(metric, value)| format!("<tr><td>{metric}</td><td>{value}</td></tr>\n"))
        .collect();

    format!(
        "<html>\n<head>\n<title>API Testing Report</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n<body>\n<h1>API Test Report</h1>\n\
         <p>Test date: {date}</p>\n\
         <p><strong>API Endpoint Under Test:</strong> {endpoint}</p>\n\
         <table>\n<tr><th>Metric</th><th>Value</th></tr>\n\
         {rows}\
         </table>\n</body>\n</html>\n",
        endpoint = escape(endpoint),
    )
}

/// Render the report stamped with the current time and write it to `path`.
pub fn write_html_report(
    path: impl AsRef<Path>,
    endpoint: &str,
    summary: &MetricsSummary,
) -> std::io::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_html(endpoint, summary, now()))?;
    info!("HTML report written to {}", path.display());
    Ok(())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
