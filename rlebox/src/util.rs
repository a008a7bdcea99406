use std::time::Duration;

use humansize::{file_size_opts as options, FileSize};

pub fn format_size(bytes: u64) -> String {
    bytes
        .file_size(options::BINARY)
        .unwrap_or_else(|_| bytes.to_string())
}

pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{:.2}%", ratio * 100.0),
        None => "-".into(),
    }
}

#[inline(always)]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
