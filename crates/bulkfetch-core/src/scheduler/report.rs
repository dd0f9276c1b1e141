use std::path::PathBuf;

/// Terminal state of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Fetched and committed to this absolute path.
    Committed(PathBuf),
    /// Destination already existed.
    Skipped,
    /// Every attempt failed.
    Abandoned,
}

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub url: String,
    pub slot: usize,
    pub attempts: u32,
    pub result: TaskResult,
}

/// Per-task reports of a run, in completion order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<TaskReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn committed(&self) -> usize {
        self.count(|r| matches!(r, TaskResult::Committed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| *r == TaskResult::Skipped)
    }

    /// URLs of abandoned tasks.
    pub fn abandoned(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| r.result == TaskResult::Abandoned)
            .map(|r| r.url.as_str())
            .collect()
    }

    pub fn report_for(&self, url: &str) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.url == url)
    }

    fn count(&self, pred: impl Fn(&TaskResult) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.result)).count()
    }
}
