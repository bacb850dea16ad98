//! Decides whether new output should pull the viewport down.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub scroll_top: i32,
    pub scroll_height: i32,
    pub client_height: i32,
}

impl ScrollSample {
    pub fn is_at_bottom(&self, threshold_px: i32) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold_px
    }
}

/// Tracks the last debounced scroll sample; each response follows the
/// output only if the reader was at the bottom when it started.
#[derive(Debug, Clone, Copy)]
pub struct AutoScroll {
    threshold_px: i32,
    at_bottom: bool,
}

impl AutoScroll {
    pub fn new(threshold_px: i32) -> Self {
        Self {
            threshold_px,
            at_bottom: true,
        }
    }

    pub fn record(&mut self, sample: ScrollSample) {
        self.at_bottom = sample.is_at_bottom(self.threshold_px);
    }

    /// Called when a response starts.
    pub fn begin_response(&self) -> bool {
        self.at_bottom
    }

    /// Transcript replaced (session switch, new chat): jump to the end.
    pub fn reset(&mut self) {
        self.at_bottom = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(scroll_top: i32) -> ScrollSample {
        ScrollSample {
            scroll_top,
            scroll_height: 1000,
            client_height: 400,
        }
    }

    #[test]
    fn test_bottom_threshold() {
        assert!(sample(600).is_at_bottom(10));
        assert!(sample(591).is_at_bottom(10));
        assert!(!sample(589).is_at_bottom(10));
    }

    #[test]
    fn test_scrolled_up_reader_is_not_yanked() {
        let mut scroll = AutoScroll::new(10);
        scroll.record(sample(100));
        assert!(!scroll.begin_response());
        scroll.record(sample(600));
        assert!(scroll.begin_response());
    }

    #[test]
    fn test_reset_follows_again() {
        let mut scroll = AutoScroll::new(10);
        scroll.record(sample(0));
        scroll.reset();
        assert!(scroll.begin_response());
    }
}
