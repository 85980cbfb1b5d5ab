//! Test fixture: a module whose `Export` symbol is a plain C function rather
//! than a command declaration. The host must reject it as a contract
//! violation.

/// Foreign `Export` entry point with no declaration behind it.
#[unsafe(no_mangle)]
#[expect(non_snake_case, reason = "the host resolves this exact symbol name")]
pub extern "C" fn Export() {}
