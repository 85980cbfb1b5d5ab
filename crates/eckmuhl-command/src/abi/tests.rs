//! Unit tests for declaration verification.

use rstest::rstest;

use super::*;
use crate::command::{CommandResult, Outcome};

struct Noop;

impl Command for Noop {
    fn run(&mut self, _args: &[String]) -> CommandResult {
        Ok(Outcome::Completed)
    }
}

fn noop() -> Box<dyn Command> {
    Box::new(Noop)
}

#[test]
fn current_declaration_verifies() {
    let declaration = CommandDeclaration::new(noop);
    let factory = declaration.verify().expect("declaration from this build");
    let mut command = factory();
    assert_eq!(command.run(&[]).expect("runs"), Outcome::Completed);
}

#[test]
fn declaration_records_this_build_fingerprint() {
    let declaration = CommandDeclaration::new(noop);
    assert_eq!(declaration.fingerprint(), Some(COMPILER_FINGERPRINT));
    assert_eq!(declaration.header().abi_version(), ABI_VERSION);
}

#[rstest]
#[case::foreign_magic(
    DeclarationHeader::from_parts(*b"NOTOURS\0", ABI_VERSION, DECLARATION_SIZE),
    DeclarationMismatch::NotADeclaration
)]
#[case::newer_abi(
    DeclarationHeader::from_parts(DECLARATION_MAGIC, ABI_VERSION + 1, DECLARATION_SIZE),
    DeclarationMismatch::AbiVersion { expected: ABI_VERSION, found: ABI_VERSION + 1 }
)]
#[case::truncated(
    DeclarationHeader::from_parts(DECLARATION_MAGIC, ABI_VERSION, 8),
    DeclarationMismatch::Size { expected: DECLARATION_SIZE, found: 8 }
)]
fn header_mismatches_are_reported(
    #[case] header: DeclarationHeader,
    #[case] expected: DeclarationMismatch,
) {
    assert_eq!(header.verify(), Err(expected.clone()));
    let declaration = CommandDeclaration::with_parts(header, COMPILER_FINGERPRINT, noop);
    let error = declaration.verify().expect_err("mismatch must be rejected");
    assert_eq!(error, expected);
}

#[test]
fn foreign_magic_is_checked_before_version() {
    let header = DeclarationHeader::from_parts([0; 8], 0, 0);
    assert_eq!(header.verify(), Err(DeclarationMismatch::NotADeclaration));
}

#[test]
fn other_compiler_is_rejected() {
    let declaration = CommandDeclaration::with_parts(
        DeclarationHeader::current(),
        "rustc 0.0.1 (deadbeef 1970-01-01)",
        noop,
    );
    let error = declaration.verify().expect_err("compiler mismatch");
    assert!(matches!(error, DeclarationMismatch::Compiler { .. }));
    let message = error.to_string();
    assert!(
        message.contains("rustc 0.0.1"),
        "expected plugin compiler in message: {message}"
    );
}

#[test]
fn unknown_plugin_compiler_is_rejected() {
    let declaration =
        CommandDeclaration::with_parts(DeclarationHeader::current(), UNKNOWN_FINGERPRINT, noop);
    assert_eq!(
        declaration.verify().map(|_| ()),
        Err(DeclarationMismatch::UnknownCompiler)
    );
}

#[test]
fn this_build_has_a_known_compiler() {
    assert_ne!(COMPILER_FINGERPRINT, UNKNOWN_FINGERPRINT);
}

#[test]
fn mismatch_messages_name_the_symbol() {
    let message = DeclarationMismatch::NotADeclaration.to_string();
    assert!(message.contains("Export"), "unexpected message: {message}");
}

#[test]
fn loader_symbol_name_matches_export() {
    assert_eq!(EXPORT_SYMBOL_NUL.to_str(), Ok(EXPORT_SYMBOL));
}
