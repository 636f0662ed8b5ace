//! Progress notifications.

use std::sync::mpsc::Sender;

/// Records evaluated so far out of the deduplicated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(processed: usize, total: usize) -> Self {
        Self { processed, total }
    }

    /// Percentage complete; an empty batch is complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let percent = self.processed.min(self.total) * 100 / self.total;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Receiver of progress notifications.
///
/// Called after each record. Implementations must not block and must not
/// fail the batch; delivery is best effort.
pub trait ProgressSink {
    fn report(&self, progress: Progress);
}

/// Sink that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

impl ProgressSink for Sender<Progress> {
    fn report(&self, progress: Progress) {
        // A dropped receiver only means nobody is listening.
        let _ = self.send(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_bounded() {
        assert_eq!(Progress::new(0, 0).percent(), 100);
        assert_eq!(Progress::new(1, 3).percent(), 33);
        assert_eq!(Progress::new(5, 3).percent(), 100);
    }

    #[test]
    fn channel_sink_ignores_a_closed_receiver() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.report(Progress::new(1, 2));
        assert_eq!(rx.recv().ok(), Some(Progress::new(1, 2)));
        drop(rx);
        tx.report(Progress::new(2, 2));
    }
}
