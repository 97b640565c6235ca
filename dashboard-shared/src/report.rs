//! Typed processing report.
//!
//! `/process-image` answers with three-to-four named report sections. This
//! module turns them into an ordered list of severity-tagged entries plus
//! the result panel the UI should activate, keeping the decision logic
//! independent of how the frontend renders it.

use serde::{Deserialize, Serialize};

use crate::types::{ProcessResults, ReportSection};

/// Severity of one report entry, selecting its styling in the log area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Failure,
}

impl Severity {
    /// CSS color used by the report log.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#00ff00",
            Severity::Info => "#00aaaa",
            Severity::Failure => "#ff4444",
        }
    }

    /// Badge text shown before the message.
    pub fn badge(&self) -> &'static str {
        match self {
            Severity::Success => "SUCCESS",
            Severity::Info => "INFO",
            Severity::Failure => "ERROR",
        }
    }
}

/// One severity-tagged line of the processing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub severity: Severity,
    pub message: String,
}

impl ReportEntry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Result panel shown in the image tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPanel {
    /// The raw captured/uploaded frame.
    #[default]
    Frame,
    /// The thresholded (binarized) frame.
    Threshold,
    /// The frame with the matched star pattern drawn.
    Pattern,
}

/// What a processing response means for the UI: which panel to activate
/// and which report entries to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub active_panel: ResultPanel,
    pub entries: Vec<ReportEntry>,
}

fn severity_of(section: &ReportSection) -> Severity {
    if section.kind.eq_ignore_ascii_case("success") {
        Severity::Success
    } else if section.kind.eq_ignore_ascii_case("info") {
        Severity::Info
    } else {
        Severity::Failure
    }
}

/// Evaluate a processing report.
///
/// The pattern section comes first and decides the active panel: a
/// successful pattern match activates the pattern panel, anything else
/// falls back to the raw frame. The remaining sections follow in the
/// server's order. A failed match is application data, not an error.
pub fn evaluate_results(results: &ProcessResults) -> ProcessOutcome {
    let pattern_severity = severity_of(&results.pattern);
    let active_panel = if pattern_severity == Severity::Success {
        ResultPanel::Pattern
    } else {
        ResultPanel::Frame
    };

    let mut entries = vec![ReportEntry::new(pattern_severity, &results.pattern.msg)];
    entries.push(ReportEntry::new(
        severity_of(&results.threshold),
        &results.threshold.msg,
    ));
    entries.push(ReportEntry::new(
        severity_of(&results.stars),
        &results.stars.msg,
    ));
    if let Some(labeled) = &results.labeled {
        entries.push(ReportEntry::new(severity_of(labeled), &labeled.msg));
    }

    ProcessOutcome {
        active_panel,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: &str, msg: &str) -> ReportSection {
        ReportSection {
            kind: kind.to_string(),
            msg: msg.to_string(),
        }
    }

    fn results(pattern_kind: &str) -> ProcessResults {
        ProcessResults {
            pattern: section(pattern_kind, "Pattern found: Ursa Minor"),
            threshold: section("info", "Automatic threshold selected: 171"),
            stars: section("info", "Possible stars found in the image: 7"),
            labeled: None,
        }
    }

    #[test]
    fn pattern_success_activates_pattern_panel() {
        let outcome = evaluate_results(&results("success"));
        assert_eq!(outcome.active_panel, ResultPanel::Pattern);
        assert_eq!(outcome.entries[0].severity, Severity::Success);
    }

    #[test]
    fn pattern_failure_falls_back_to_frame_panel() {
        // The server spells the failure kind with a capital E.
        let outcome = evaluate_results(&results("Error"));
        assert_eq!(outcome.active_panel, ResultPanel::Frame);
        assert_eq!(outcome.entries[0].severity, Severity::Failure);
    }

    #[test]
    fn sections_keep_server_order() {
        let mut r = results("success");
        r.labeled = Some(section("info", "Extra guide stars labeled: 4"));
        let outcome = evaluate_results(&r);
        let messages: Vec<&str> = outcome
            .entries
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Pattern found: Ursa Minor",
                "Automatic threshold selected: 171",
                "Possible stars found in the image: 7",
                "Extra guide stars labeled: 4",
            ]
        );
    }

    #[test]
    fn labeled_section_is_optional() {
        let outcome = evaluate_results(&results("success"));
        assert_eq!(outcome.entries.len(), 3);
    }

    #[test]
    fn non_pattern_sections_are_info_styled() {
        let outcome = evaluate_results(&results("Error"));
        assert_eq!(outcome.entries[1].severity, Severity::Info);
        assert_eq!(outcome.entries[2].severity, Severity::Info);
    }
}
