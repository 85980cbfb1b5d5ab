//! Binary contract between the host and a plugin module.
//!
//! The `Export` symbol points at a `#[repr(C)]` [`CommandDeclaration`]. Its
//! leading [`DeclarationHeader`] has a fixed layout for every ABI version so
//! the host can reject foreign or outdated symbols before touching anything
//! else. After the header come the compiler fingerprint and the factory.

use std::ffi::CStr;
use std::mem::size_of;
use std::{slice, str};

use thiserror::Error;

use crate::command::Command;

/// Name of the symbol every plugin exports.
pub const EXPORT_SYMBOL: &str = "Export";

/// [`EXPORT_SYMBOL`] as the NUL-terminated name handed to the platform loader.
pub const EXPORT_SYMBOL_NUL: &CStr = c"Export";

/// Version of the declaration layout. Bump on any change to
/// [`CommandDeclaration`] or to the [`Command`] trait.
pub const ABI_VERSION: u32 = 1;

/// Compiler that built this copy of the crate.
pub const COMPILER_FINGERPRINT: &str = env!("ECKMUHL_COMPILER_FINGERPRINT");

/// Fingerprint recorded when the compiler version could not be determined.
pub const UNKNOWN_FINGERPRINT: &str = env!("ECKMUHL_UNKNOWN_FINGERPRINT");

const DECLARATION_MAGIC: [u8; 8] = *b"ECKMUHL\0";

#[expect(
    clippy::cast_possible_truncation,
    reason = "the declaration is a handful of words"
)]
const DECLARATION_SIZE: u32 = size_of::<CommandDeclaration>() as u32;

/// Zero-argument factory producing the command instance.
pub type CommandFactory = fn() -> Box<dyn Command>;

/// Fixed-layout prefix of a [`CommandDeclaration`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationHeader {
    magic: [u8; 8],
    abi_version: u32,
    size: u32,
}

impl DeclarationHeader {
    /// Header written by this build.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            magic: DECLARATION_MAGIC,
            abi_version: ABI_VERSION,
            size: DECLARATION_SIZE,
        }
    }

    /// Builds a header from raw parts, mainly to exercise verification.
    #[must_use]
    pub const fn from_parts(magic: [u8; 8], abi_version: u32, size: u32) -> Self {
        Self {
            magic,
            abi_version,
            size,
        }
    }

    /// ABI version announced by the module.
    #[must_use]
    pub const fn abi_version(&self) -> u32 {
        self.abi_version
    }

    /// Checks the header against the host's expectations.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found, checking magic, then ABI version,
    /// then declaration size.
    pub fn verify(&self) -> Result<(), DeclarationMismatch> {
        if self.magic != DECLARATION_MAGIC {
            return Err(DeclarationMismatch::NotADeclaration);
        }
        if self.abi_version != ABI_VERSION {
            return Err(DeclarationMismatch::AbiVersion {
                expected: ABI_VERSION,
                found: self.abi_version,
            });
        }
        if self.size != DECLARATION_SIZE {
            return Err(DeclarationMismatch::Size {
                expected: DECLARATION_SIZE,
                found: self.size,
            });
        }
        Ok(())
    }
}

/// Record exported by a plugin under [`EXPORT_SYMBOL`].
///
/// Build it with [`export_command!`](crate::export_command) rather than by
/// hand.
#[repr(C)]
#[derive(Debug)]
pub struct CommandDeclaration {
    header: DeclarationHeader,
    fingerprint_ptr: *const u8,
    fingerprint_len: usize,
    factory: CommandFactory,
}

// SAFETY: the fingerprint pointer always refers to a `&'static str` and is
// never written through.
unsafe impl Sync for CommandDeclaration {}

impl CommandDeclaration {
    /// Declares `factory` with this build's header and fingerprint.
    #[must_use]
    pub const fn new(factory: CommandFactory) -> Self {
        Self::with_parts(DeclarationHeader::current(), COMPILER_FINGERPRINT, factory)
    }

    /// Builds a declaration from explicit parts, mainly to exercise
    /// verification.
    #[must_use]
    pub const fn with_parts(
        header: DeclarationHeader,
        fingerprint: &'static str,
        factory: CommandFactory,
    ) -> Self {
        Self {
            header,
            fingerprint_ptr: fingerprint.as_ptr(),
            fingerprint_len: fingerprint.len(),
            factory,
        }
    }

    /// The fixed-layout header.
    #[must_use]
    pub const fn header(&self) -> &DeclarationHeader {
        &self.header
    }

    /// Compiler fingerprint recorded by the module, if it is valid UTF-8.
    #[must_use]
    pub fn fingerprint(&self) -> Option<&str> {
        // SAFETY: declarations are only built through `with_parts`, which
        // takes the pointer and length from a `&'static str`. Declarations
        // read from a module are only inspected after `DeclarationHeader::verify`
        // accepted the layout.
        let bytes = unsafe { slice::from_raw_parts(self.fingerprint_ptr, self.fingerprint_len) };
        str::from_utf8(bytes).ok()
    }

    /// Verifies the whole declaration and returns its factory.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationMismatch`] when the header is rejected, when
    /// either side's compiler is unknown, or when the module was built by a
    /// different compiler.
    pub fn verify(&self) -> Result<CommandFactory, DeclarationMismatch> {
        self.header.verify()?;
        match self.fingerprint() {
            Some(found)
                if found == UNKNOWN_FINGERPRINT || COMPILER_FINGERPRINT == UNKNOWN_FINGERPRINT =>
            {
                Err(DeclarationMismatch::UnknownCompiler)
            }
            Some(found) if found == COMPILER_FINGERPRINT => Ok(self.factory),
            Some(found) => Err(DeclarationMismatch::Compiler {
                expected: COMPILER_FINGERPRINT.to_owned(),
                found: found.to_owned(),
            }),
            None => Err(DeclarationMismatch::UnreadableFingerprint),
        }
    }
}

/// Reasons a module's `Export` symbol does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationMismatch {
    /// The symbol exists but does not start with the declaration magic.
    #[error("symbol `Export` is not a command declaration")]
    NotADeclaration,
    /// The module was built against another layout of the contract.
    #[error("command ABI version {found} is not supported (expected {expected})")]
    AbiVersion {
        /// Version the host understands.
        expected: u32,
        /// Version announced by the module.
        found: u32,
    },
    /// The declaration size disagrees with the announced ABI version.
    #[error("command declaration is {found} bytes (expected {expected})")]
    Size {
        /// Size the host expects.
        expected: u32,
        /// Size announced by the module.
        found: u32,
    },
    /// The module was built by another compiler.
    #[error("plugin was built with '{found}' but the host was built with '{expected}'")]
    Compiler {
        /// Host compiler fingerprint.
        expected: String,
        /// Module compiler fingerprint.
        found: String,
    },
    /// The host or the module could not record its compiler version.
    #[error(
        "compiler version of the plugin or the host is unknown; rebuild both with a working rustc"
    )]
    UnknownCompiler,
    /// The fingerprint bytes are not valid UTF-8.
    #[error("command declaration carries an unreadable compiler fingerprint")]
    UnreadableFingerprint,
}

#[cfg(test)]
mod tests;
