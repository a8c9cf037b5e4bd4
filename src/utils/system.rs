use std::time::Duration;
use sysinfo::System;

use crate::constants::{FALLBACK_PROCESSING_THREADS, MAX_PROCESSING_THREADS};

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Resolve the worker count. Zero means one worker per physical core.
pub fn resolve_worker_threads(configured: usize) -> usize {
    if configured > 0 {
        return configured.min(MAX_PROCESSING_THREADS);
    }

    System::physical_core_count()
        .filter(|&cores| cores > 0)
        .unwrap_or(FALLBACK_PROCESSING_THREADS)
        .min(MAX_PROCESSING_THREADS)
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
