//! Compile-time build information, shown by `duoroom --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner.
pub fn version_line() -> String {
    format!(
        "duoroom {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
