//! Simple profiling utility for measuring tick performance.
//!
//! Used by the stress test to report per-section timings. Enable the
//! `profile` feature to pull the profiler into release instrumentation:
//!
//! ```bash
//! cargo test --release --features profile
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A simple profiler for measuring named sections of code.
#[derive(Default)]
pub struct Profiler {
    /// Accumulated time per section
    sections: HashMap<String, SectionStats>,
    /// Current section being timed (if any)
    current_section: Option<(String, Instant)>,
}

/// Statistics for a profiled section
#[derive(Default, Clone)]
pub struct SectionStats {
    pub total_time: Duration,
    pub call_count: u64,
    pub max_time: Option<Duration>,
}

impl SectionStats {
    pub fn avg_time(&self) -> Duration {
        if self.call_count == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.call_count as u32
        }
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a named section. Call `end_section` to stop timing.
    pub fn begin_section(&mut self, name: &str) {
        self.current_section = Some((name.to_string(), Instant::now()));
    }

    /// End the current section and record its duration.
    pub fn end_section(&mut self) {
        if let Some((name, start)) = self.current_section.take() {
            let elapsed = start.elapsed();
            let stats = self.sections.entry(name).or_default();
            stats.total_time += elapsed;
            stats.call_count += 1;
            stats.max_time = Some(stats.max_time.map_or(elapsed, |m| m.max(elapsed)));
        }
    }

    /// Time a section using a closure.
    pub fn time_section<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.begin_section(name);
        let result = f();
        self.end_section();
        result
    }

    /// Get statistics for a specific section.
    pub fn get_section(&self, name: &str) -> Option<&SectionStats> {
        self.sections.get(name)
    }

    /// Render a summary of all profiled sections, slowest first.
    pub fn report(&self) -> String {
        let mut sections: Vec<_> = self.sections.iter().collect();
        sections.sort_by(|a, b| b.1.total_time.cmp(&a.1.total_time));

        let mut out = String::new();
        out.push_str(&format!(
            "{:<20} {:>12} {:>8} {:>12} {:>12}\n",
            "Section", "Total", "Calls", "Avg", "Max"
        ));
        for (name, stats) in &sections {
            out.push_str(&format!(
                "{:<20} {:>12.2?} {:>8} {:>12.2?} {:>12.2?}\n",
                name,
                stats.total_time,
                stats.call_count,
                stats.avg_time(),
                stats.max_time.unwrap_or(Duration::ZERO),
            ));
        }
        out
    }

    /// Reset all profiling data.
    pub fn reset(&mut self) {
        self.sections.clear();
        self.current_section = None;
    }
}
