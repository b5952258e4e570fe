use crate::snapshot::ReportKind;

/// Decides when a report is due based on characters processed
///
/// Performs no I/O. The driver dispatches whatever this returns.
#[derive(Debug)]
pub struct ReportScheduler {
    threshold: u64,
    since_last_report: u64,
    reports: u64,
}

impl ReportScheduler {
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            since_last_report: 0,
            reports: 0,
        }
    }

    /// Add `n` characters; returns `Some(Interval)` when the threshold is reached
    ///
    /// The counter restarts from zero after a report, even if the chunk
    /// overshot the threshold.
    pub fn on_chars_processed(&mut self, n: u64) -> Option<ReportKind> {
        self.since_last_report += n;
        if self.since_last_report >= self.threshold {
            self.since_last_report = 0;
            self.reports += 1;
            Some(ReportKind::Interval)
        } else {
            None
        }
    }

    /// End of stream always yields a final report
    pub fn on_stream_end(&mut self) -> ReportKind {
        self.since_last_report = 0;
        self.reports += 1;
        ReportKind::Final
    }

    pub fn chars_since_last_report(&self) -> u64 {
        self.since_last_report
    }

    /// Reports requested so far
    pub fn reports(&self) -> u64 {
        self.reports
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold() {
        let mut scheduler = ReportScheduler::new(10);
        assert_eq!(scheduler.on_chars_processed(4), None);
        assert_eq!(scheduler.on_chars_processed(5), None);
        assert_eq!(scheduler.chars_since_last_report(), 9);
    }

    #[test]
    fn test_reaching_threshold_resets() {
        let mut scheduler = ReportScheduler::new(10);
        scheduler.on_chars_processed(6);
        assert_eq!(scheduler.on_chars_processed(4), Some(ReportKind::Interval));
        assert_eq!(scheduler.chars_since_last_report(), 0);
    }

    #[test]
    fn test_overshoot_discards_remainder() {
        let mut scheduler = ReportScheduler::new(10);
        assert_eq!(scheduler.on_chars_processed(25), Some(ReportKind::Interval));
        assert_eq!(scheduler.chars_since_last_report(), 0);
        assert_eq!(scheduler.on_chars_processed(9), None);
    }

    #[test]
    fn test_stream_end_always_reports() {
        let mut scheduler = ReportScheduler::new(10);
        assert_eq!(scheduler.on_stream_end(), ReportKind::Final);
        assert_eq!(scheduler.reports(), 1);

        let mut scheduler = ReportScheduler::new(10);
        scheduler.on_chars_processed(10);
        assert_eq!(scheduler.on_stream_end(), ReportKind::Final);
        assert_eq!(scheduler.reports(), 2);
    }
}
