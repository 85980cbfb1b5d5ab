//! Build script: bake the version identifier and build timestamp reported by
//! `eckmuhl version` into the binary.

use std::env;

use eckmuhl_build_util::{
    BUILT_AT_VAR, SOURCE_DATE_EPOCH_VAR, VERSION_VAR, resolve_built_at, resolve_version,
    unix_now,
};

fn main() {
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
    println!("cargo:rerun-if-env-changed={BUILT_AT_VAR}");
    println!("cargo:rerun-if-env-changed={SOURCE_DATE_EPOCH_VAR}");

    let lookup = |key: &str| env::var(key).ok();
    let mut warnings = Vec::new();
    let version = resolve_version(lookup, &mut warnings);
    let built_at = resolve_built_at(lookup, unix_now(), &mut warnings);
    for warning in warnings {
        println!("cargo:warning={warning}");
    }

    println!("cargo:rustc-env=ECKMUHL_BUILD_VERSION={version}");
    println!("cargo:rustc-env=ECKMUHL_BUILD_TIMESTAMP={built_at}");
}
