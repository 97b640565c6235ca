//! Severity-styled rendering of processing report entries.

use dashboard_shared::ReportEntry;
use yew::prelude::*;

/// A report entry together with the wall-clock time it was appended.
#[derive(Clone, PartialEq)]
pub struct TimedEntry {
    /// Unix timestamp in milliseconds (`js_sys::Date::now`).
    pub timestamp_ms: f64,
    pub entry: ReportEntry,
}

impl TimedEntry {
    pub fn new(timestamp_ms: f64, entry: ReportEntry) -> Self {
        Self {
            timestamp_ms,
            entry,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ReportLogProps {
    pub entries: Vec<TimedEntry>,
    #[prop_or("220px".into())]
    pub max_height: AttrValue,
}

/// Log area for the processing report. Entries are appended by the
/// workflow controller; this component only renders them.
#[function_component(ReportLog)]
pub fn report_log(props: &ReportLogProps) -> Html {
    html! {
        <div
            class="report-log"
            style={format!("font-family: 'Courier New', monospace; font-size: 0.75em; background: #0a0a0a; border: 1px solid #333; padding: 5px; max-height: {}; overflow-y: auto;", props.max_height)}
        >
            { for props.entries.iter().map(render_entry) }
            if props.entries.is_empty() {
                <div style="color: #666; text-align: center; padding: 20px;">
                    {"No results yet..."}
                </div>
            }
        </div>
    }
}

fn render_entry(timed: &TimedEntry) -> Html {
    let severity = timed.entry.severity;

    html! {
        <div style="white-space: pre-wrap; word-break: break-word; margin: 1px 0;">
            <span style="color: #666;">{format_timestamp(timed.timestamp_ms)}</span>
            <span style={format!("color: {}; font-weight: bold;", severity.color())}>
                {format!("[{}] ", severity.badge())}
            </span>
            <span style="color: #ddd;">{&timed.entry.message}</span>
        </div>
    }
}

/// Format an epoch-milliseconds timestamp as `HH:MM:SS `.
fn format_timestamp(timestamp_ms: f64) -> String {
    let total_secs = (timestamp_ms / 1000.0) as u64;
    let hours = (total_secs / 3600) % 24;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{mins:02}:{secs:02} ")
}
