use crate::ui::{BookendPhase, Reporter};
use parking_lot::Mutex;

/// One reported outcome, in the order it was reported
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Bookend { command: String, phase: BookendPhase },
    Success(String),
    Error(String),
    Fields(Vec<(String, String)>),
    Results { title: String, rows: Vec<Vec<String>> },
}

/// Reporter that keeps every outcome in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.reports
            .lock()
            .iter()
            .filter_map(|report| match report {
                Report::Success(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.reports
            .lock()
            .iter()
            .filter_map(|report| match report {
                Report::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.reports.lock().clear();
    }

    fn push(&self, report: Report) {
        self.reports.lock().push(report);
    }
}

impl Reporter for RecordingReporter {
    fn bookend(&self, command: &str, phase: BookendPhase, _message: Option<&str>) {
        self.push(Report::Bookend {
            command: command.to_string(),
            phase,
        });
    }

    fn success(&self, message: &str) {
        self.push(Report::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Report::Error(message.to_string()));
    }

    fn fields(&self, rows: &[(String, String)]) {
        self.push(Report::Fields(rows.to_vec()));
    }

    fn results(&self, title: &str, rows: &[Vec<String>]) {
        self.push(Report::Results {
            title: title.to_string(),
            rows: rows.to_vec(),
        });
    }
}
