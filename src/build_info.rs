//! Build information
//!
//! Build counter and compile time stamped by `build.rs`, surfaced in the
//! startup banner, the status tool and the FoodData Central user agent.

use std::fmt;

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// ISO 8601 compile time, or "unknown" outside a `build.rs` build
pub const BUILD_TIMESTAMP: &str = match option_env!("FOODLOG_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Build counter; 0 when the stamp is absent or malformed
pub fn build_number() -> u64 {
    option_env!("FOODLOG_BUILD_NUMBER")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

/// `User-Agent` sent with every search request
pub fn user_agent() -> String {
    format!("{}/{} (build {})", NAME, VERSION, build_number())
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: build_number(),
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} build {} ({})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Startup banner on stderr; stdout carries the MCP transport
pub fn print_startup_banner() {
    let rule = "=".repeat(47);
    eprintln!("{}", rule);
    eprintln!("  Food Log: FoodData Central nutrient totals");
    eprintln!("  {}", BuildInfo::current());
    eprintln!("{}", rule);
}
