//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// "hero-idle 0.1.0 (2025-01-01, abc1234)"
pub fn version_string() -> String {
    format!(
        "hero-idle {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
