use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RevealConfig {
    pub initial_count: usize,
    pub increase_per_scroll: usize,
    pub debounce: Duration
}

impl RevealConfig {
    pub fn new(initial_count: usize, increase_per_scroll: usize) -> Self {
        RevealConfig {
            initial_count,
            increase_per_scroll,
            debounce: DEFAULT_DEBOUNCE
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig::new(20, 20)
    }
}

/// Drops events that arrive within `window` of the last accepted one.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer { window, last: None }
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Prefix of the visible rows that is actually rendered.
#[derive(Clone, Debug)]
pub struct RevealWindow {
    config: RevealConfig,
    shown: usize,
    at_bottom: bool,
    consumed_end: Option<usize>,
    debouncer: Debouncer
}

impl RevealWindow {
    pub fn new(config: RevealConfig) -> Self {
        RevealWindow {
            config,
            shown: config.initial_count,
            at_bottom: false,
            consumed_end: None,
            debouncer: Debouncer::new(config.debounce)
        }
    }

    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Number of rows rendered out of `total` visible rows.
    pub fn len(&self, total: usize) -> usize {
        self.shown.min(total)
    }

    pub fn is_complete(&self, total: usize) -> bool {
        self.shown >= total
    }

    /// Feeds the "scrolled to bottom" signal. The window grows when the signal
    /// falls from true to false. Rising edges inside the debounce window are ignored.
    /// Returns `true` when the window grew.
    pub fn signal(&mut self, at_bottom: bool, now: Instant, total: usize) -> bool {
        match (self.at_bottom, at_bottom) {
            (false, true) => {
                if self.debouncer.accept(now) {
                    self.at_bottom = true;
                }
                false
            }
            (true, false) => {
                self.at_bottom = false;
                if self.is_complete(total) {
                    return false;
                }
                self.shown = (self.shown + self.config.increase_per_scroll).min(total.max(self.config.initial_count));
                log::trace!("reveal window grew to {} of {} rows", self.shown, total);
                true
            }
            _ => false
        }
    }

    /// A full true→false pulse, as produced by one debounced scroll-to-bottom event.
    pub fn pulse(&mut self, now: Instant, total: usize) -> bool {
        self.signal(true, now, total) | self.signal(false, now, total)
    }

    /// Reports whether the last revealed row is on screen. Each distinct last
    /// row grows the window at most once, so resting at the bottom is not a
    /// stream of pulses. A debounced arrival is retried on the next report.
    pub fn end_shown(&mut self, shown: bool, now: Instant, total: usize) -> bool {
        let end = self.len(total);
        if !shown || self.consumed_end == Some(end) {
            return false;
        }
        let grew = self.pulse(now, total);
        if grew {
            self.consumed_end = Some(end);
        }
        grew
    }

    pub fn reset(&mut self) {
        self.shown = self.config.initial_count;
        self.at_bottom = false;
        self.consumed_end = None;
        self.debouncer.reset();
    }
}
