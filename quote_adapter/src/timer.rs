//! Wall-clock timings of the operations run by the adapter.
//!
//! Each operation runs inside [`Timings::time`], which logs the elapsed time when the
//! operation ends and keeps it for the summary logged just before the process exits.
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use log::debug;

/// Width of the longest bar in the summary.
const BAR_WIDTH: usize = 40;

/// Timings recorded during one invocation, in the order the operations finished.
#[derive(Debug, Default)]
pub struct Timings {
    entries: Vec<(String, Duration)>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` and records how long it took under `name`.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        debug!("{} started", name);
        let value = f();
        let elapsed = start.elapsed();
        debug!("{} took {:.3} ms", name, elapsed.as_secs_f64() * 1000.0);
        self.record(name, elapsed);
        value
    }

    pub fn record(&mut self, name: &str, elapsed: Duration) {
        self.entries.push((String::from(name), elapsed));
    }

    pub fn entries(&self) -> &[(String, Duration)] {
        &self.entries
    }

    /// Renders the timings as a bar chart scaled to the slowest entry.
    pub fn graph(&self) -> String {
        if self.entries.is_empty() {
            return String::from("No timings recorded");
        }
        let name_width = self.entries.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        let slowest = self
            .entries
            .iter()
            .map(|(_, d)| d.as_secs_f64())
            .fold(0.0_f64, f64::max);

        let mut out = String::from("Timing summary:");
        for (name, elapsed) in &self.entries {
            let secs = elapsed.as_secs_f64();
            let bar = if slowest > 0.0 {
                ((secs / slowest) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let _ = write!(
                out,
                "\n  {:<width$} |{:<bar_width$}| {:.3} ms",
                name,
                "#".repeat(bar.max(1)),
                secs * 1000.0,
                width = name_width,
                bar_width = BAR_WIDTH
            );
        }
        out
    }
}
