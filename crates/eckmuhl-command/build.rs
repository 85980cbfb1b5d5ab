//! Build script: record the compiler fingerprint stamped into every command
//! declaration.

use eckmuhl_build_util::{UNKNOWN_FINGERPRINT, compiler_fingerprint};

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");

    let mut warnings = Vec::new();
    let fingerprint = compiler_fingerprint(&mut warnings);
    for warning in warnings {
        println!("cargo:warning={warning}");
    }
    println!("cargo:rustc-env=ECKMUHL_COMPILER_FINGERPRINT={fingerprint}");
    println!("cargo:rustc-env=ECKMUHL_UNKNOWN_FINGERPRINT={UNKNOWN_FINGERPRINT}");
}
