use crate::stream::ProgressObserver;
use std::io::Write;

/// Percentage counter redrawn in place on stderr.
#[derive(Debug, Default)]
pub struct StderrProgress {
    drawn: bool,
}

impl ProgressObserver for StderrProgress {
    fn on_progress(&mut self, percent: u8) {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{percent:>3}%");
        let _ = stderr.flush();
        self.drawn = true;
    }

    fn on_finish(&mut self) {
        if self.drawn {
            eprint!("\r    \r");
            self.drawn = false;
        }
    }
}
