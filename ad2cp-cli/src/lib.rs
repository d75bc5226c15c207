//! Library entry for ad2cp-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

/// Log filter directive for a `-v` count
///
/// 0 keeps integrity warnings only, 1 adds the per-scan summary, 2 and up traces
/// every record.
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(2), "trace");
        assert_eq!(log_filter(9), "trace");
    }
}
