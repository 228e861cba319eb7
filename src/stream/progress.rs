/// Receives advisory progress while a file is read.
pub trait ProgressObserver {
    /// Called with a whole-number percentage each time it changes.
    fn on_progress(&mut self, percent: u8);

    /// Called once after the last line.
    fn on_finish(&mut self) {}
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent);
    }
}

/// Converts consumed bytes into percentage notifications.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: u64,
    consumed: u64,
    last_percent: Option<u8>,
}

impl ProgressTracker {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            consumed: 0,
            last_percent: None,
        }
    }

    pub fn advance(&mut self, bytes: u64, observer: &mut dyn ProgressObserver) {
        self.consumed = self.consumed.saturating_add(bytes);
        let percent = self.percent();
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            observer.on_progress(percent);
        }
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.consumed.min(self.total) * 100 / self.total) as u8
    }
}
