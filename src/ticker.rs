//! Host frame timing
//!
//! Turns the monotonically increasing timestamps a host frame callback
//! receives into per-call elapsed times. No smoothing or clamping: the
//! physics step scales itself by whatever interval it is handed.

/// Elapsed-time tracker for a timestamp stream (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    previous: Option<f64>,
}

impl Ticker {
    /// Ticker with no reference point; the first call returns 0
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Ticker whose reference point is `timestamp`
    pub fn starting_at(timestamp: f64) -> Self {
        Self {
            previous: Some(timestamp),
        }
    }

    /// Time since the previous call (or since `starting_at`)
    pub fn tick_interval(&mut self, timestamp: f64) -> f64 {
        let elapsed = match self.previous {
            Some(previous) => timestamp - previous,
            None => 0.0,
        };
        self.previous = Some(timestamp);
        elapsed
    }

    /// Last timestamp seen
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }
}
