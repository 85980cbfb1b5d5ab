//! Build-time utilities shared across eckmuhl build scripts.
//!
//! Every resolver takes an environment lookup so the build scripts can pass
//! `std::env::var` while tests pass a fixed table. Problems are collected as
//! warnings without the `cargo:warning=` prefix so the caller decides how to
//! emit them; resolution itself never fails.

use std::env;
use std::ffi::OsStr;
use std::process::Command;

use time::OffsetDateTime;

/// Environment variable overriding the version identifier baked into the host.
pub const VERSION_VAR: &str = "ECKMUHL_VERSION";
/// Environment variable overriding the build timestamp baked into the host.
pub const BUILT_AT_VAR: &str = "ECKMUHL_BUILT_AT";
/// Reproducible-build timestamp honoured when no explicit override is set.
pub const SOURCE_DATE_EPOCH_VAR: &str = "SOURCE_DATE_EPOCH";

/// Fingerprint recorded when the compiler version cannot be determined.
///
/// Declarations carrying it never verify, since two unknown compilers cannot
/// be shown to agree.
pub const UNKNOWN_FINGERPRINT: &str = "rustc unknown";

const FALLBACK_VERSION: &str = "unknown";

enum SourceDateError {
    Missing,
    InvalidInteger { raw: String },
    InvalidTimestamp { raw: String },
}

/// Resolves the version identifier reported by `eckmuhl version`.
///
/// `ECKMUHL_VERSION` wins over the package version Cargo provides.
///
/// # Examples
/// ```
/// use eckmuhl_build_util::resolve_version;
///
/// let mut warnings = Vec::new();
/// let version = resolve_version(
///     |key| (key == "CARGO_PKG_VERSION").then(|| String::from("0.1.0")),
///     &mut warnings,
/// );
///
/// assert_eq!(version, "0.1.0");
/// assert!(warnings.is_empty());
/// ```
pub fn resolve_version<F>(lookup: F, warnings: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(version) = lookup(VERSION_VAR).filter(|value| !value.trim().is_empty()) {
        return version.trim().to_owned();
    }

    lookup("CARGO_PKG_VERSION").unwrap_or_else(|| {
        warnings.push(format!(
            "neither {VERSION_VAR} nor CARGO_PKG_VERSION is set; reporting version \
             '{FALLBACK_VERSION}'"
        ));
        FALLBACK_VERSION.into()
    })
}

/// Resolves the build timestamp as Unix seconds text.
///
/// `ECKMUHL_BUILT_AT` is passed through verbatim so packagers can inject any
/// value; a malformed override only produces a warning because the host
/// degrades gracefully when rendering it. Otherwise `SOURCE_DATE_EPOCH` is
/// used when valid, and `now` is the final fallback.
///
/// # Examples
/// ```
/// use eckmuhl_build_util::resolve_built_at;
///
/// let mut warnings = Vec::new();
/// let built_at = resolve_built_at(
///     |key| (key == "SOURCE_DATE_EPOCH").then(|| String::from("1600000000")),
///     0,
///     &mut warnings,
/// );
///
/// assert_eq!(built_at, "1600000000");
/// assert!(warnings.is_empty());
/// ```
pub fn resolve_built_at<F>(lookup: F, now: i64, warnings: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(BUILT_AT_VAR) {
        if raw.trim().parse::<i64>().is_err() {
            warnings.push(format!(
                "{BUILT_AT_VAR} '{raw}' is not integer seconds since the Unix epoch; the \
                 version command will fall back to the epoch"
            ));
        }
        return raw;
    }

    match source_date(&lookup) {
        Ok(timestamp) => timestamp.to_string(),
        Err(error) => {
            push_source_date_warning(warnings, &error);
            now.to_string()
        }
    }
}

fn source_date<F>(lookup: &F) -> Result<i64, SourceDateError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(SOURCE_DATE_EPOCH_VAR) else {
        return Err(SourceDateError::Missing);
    };

    let Ok(timestamp) = raw.trim().parse::<i64>() else {
        return Err(SourceDateError::InvalidInteger { raw });
    };

    if OffsetDateTime::from_unix_timestamp(timestamp).is_err() {
        return Err(SourceDateError::InvalidTimestamp { raw });
    }

    Ok(timestamp)
}

fn push_source_date_warning(warnings: &mut Vec<String>, error: &SourceDateError) {
    match error {
        SourceDateError::Missing => {}
        SourceDateError::InvalidInteger { raw } => warnings.push(format!(
            "Invalid {SOURCE_DATE_EPOCH_VAR} '{raw}'; expected integer seconds since Unix \
             epoch; falling back to the current time"
        )),
        SourceDateError::InvalidTimestamp { raw } => warnings.push(format!(
            "Invalid {SOURCE_DATE_EPOCH_VAR} '{raw}'; not a valid Unix timestamp; falling \
             back to the current time"
        )),
    }
}

/// Resolves the compiler fingerprint recorded in command declarations.
///
/// Runs `$RUSTC --version` (or `rustc --version`). Host and plugins compare
/// fingerprints because Rust trait objects have no stable ABI across
/// compiler releases. Falls back to [`UNKNOWN_FINGERPRINT`] with a warning.
pub fn compiler_fingerprint(warnings: &mut Vec<String>) -> String {
    let rustc = env::var_os("RUSTC").unwrap_or_else(|| "rustc".into());
    fingerprint_of(&rustc, warnings)
}

fn fingerprint_of(rustc: &OsStr, warnings: &mut Vec<String>) -> String {
    let output = match Command::new(rustc).arg("--version").output() {
        Ok(output) if output.status.success() => output.stdout,
        Ok(output) => {
            warnings.push(format!(
                "'{} --version' exited with {}; recording '{UNKNOWN_FINGERPRINT}'",
                rustc.to_string_lossy(),
                output.status
            ));
            return UNKNOWN_FINGERPRINT.into();
        }
        Err(error) => {
            warnings.push(format!(
                "failed to run '{} --version': {error}; recording '{UNKNOWN_FINGERPRINT}'",
                rustc.to_string_lossy()
            ));
            return UNKNOWN_FINGERPRINT.into();
        }
    };
    normalise_fingerprint(&String::from_utf8_lossy(&output))
        .unwrap_or_else(|| UNKNOWN_FINGERPRINT.into())
}

fn normalise_fingerprint(raw: &str) -> Option<String> {
    let line = raw.lines().next()?.trim();
    (!line.is_empty()).then(|| line.to_owned())
}

/// Current Unix time in seconds, used as the last-resort build timestamp.
#[must_use]
pub fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
