//! Memory and timing checkpoints
//!
//! - Memory: Reads RSS (Resident Set Size) from /proc/self/status
//! - Timing: Uses std::time::Instant
//!
//! Checkpoints are emitted at debug level (`RUST_LOG=climate_spiral=debug`).

use std::fs;
use std::time::Instant;

/// Current RSS in bytes, 0 where /proc is unavailable
pub fn get_rss_bytes() -> u64 {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_vm_rss_kb(&status))
        .map(|kb| kb * 1024)
        .unwrap_or(0)
}

/// Extract the VmRSS value (kB) from a /proc status dump
fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}

/// Current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Memory checkpoint that returns the value for comparison
pub fn checkpoint(label: &str) -> f64 {
    let rss = get_rss_mb();
    tracing::debug!(rss_mb = %format!("{:.2}", rss), "MEMPROF: {}", label);
    rss
}

/// Log memory growth since a previous checkpoint
pub fn delta(label: &str, previous: f64) -> f64 {
    let current = get_rss_mb();
    tracing::debug!(
        rss_mb = %format!("{:.2}", current),
        delta_mb = %format!("{:+.2}", current - previous),
        "MEMPROF: {}",
        label
    );
    current
}

/// Log section and total elapsed time, returns a new section start
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    tracing::debug!(
        section_s = %format!("{:.3}", section_start.elapsed().as_secs_f64()),
        total_s = %format!("{:.3}", start.elapsed().as_secs_f64()),
        "TIMEPROF: {}",
        label
    );
    Instant::now()
}
