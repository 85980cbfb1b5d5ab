//! Version identifier and build timestamp baked in by the build script.

use time::OffsetDateTime;

/// What `eckmuhl version` reports about this build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    version: String,
    built_at: String,
}

impl BuildInfo {
    /// Values recorded when this binary was compiled.
    #[must_use]
    pub fn current() -> Self {
        Self::new(
            env!("ECKMUHL_BUILD_VERSION"),
            env!("ECKMUHL_BUILD_TIMESTAMP"),
        )
    }

    /// Creates build information from a version and Unix-seconds text.
    #[must_use]
    pub fn new(version: impl Into<String>, built_at: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            built_at: built_at.into(),
        }
    }

    /// The version identifier.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The build time; malformed or out-of-range text yields the Unix epoch.
    #[must_use]
    pub fn built_at(&self) -> OffsetDateTime {
        self.built_at
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}
