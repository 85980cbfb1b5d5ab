//! Loading plugin modules and negotiating their command export.
//!
//! [`ModuleLoader`] abstracts the platform loader so the dispatcher can be
//! exercised with test doubles. [`DynamicLoader`] is the production
//! implementation built on `libloading`: it opens the module, resolves the
//! `Export` symbol, verifies the declaration header before reading anything
//! else, checks the compiler fingerprint and finally calls the factory.

use std::mem;
use std::path::Path;

use eckmuhl_command::{
    Command, CommandDeclaration, CommandFactory, DeclarationHeader, EXPORT_SYMBOL_NUL,
};
use libloading::Library;
use tracing::debug;

use crate::error::{ContractViolation, PluginError};

/// Turns a module path into a ready-to-run command.
pub trait ModuleLoader {
    /// Loads the module at `path` and builds its command.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::LoadFailed`] when the module cannot be opened
    /// and [`PluginError::ContractViolation`] when it does not export a valid
    /// command declaration.
    fn load(&self, path: &Path) -> Result<Box<dyn Command>, PluginError>;
}

/// Loader backed by the platform dynamic linker.
///
/// Loaded modules are never unloaded: the command's code and vtable live in
/// the module and the process ends right after the command returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLoader;

impl ModuleLoader for DynamicLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Command>, PluginError> {
        debug!(path = %path.display(), "loading plugin module");
        // SAFETY: opening a module runs its initialisers. Plugins are trusted
        // code installed beside the host by the operator.
        let library = unsafe { Library::new(path) }.map_err(|error| PluginError::LoadFailed {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

        let factory = resolve_factory(&library, path)?;
        mem::forget(library);

        debug!(path = %path.display(), "instantiating plugin command");
        Ok(factory())
    }
}

fn resolve_factory(library: &Library, path: &Path) -> Result<CommandFactory, PluginError> {
    // SAFETY: the symbol is only treated as an address here; nothing is read
    // through it until the null check below.
    let symbol = unsafe {
        library.get::<*const DeclarationHeader>(EXPORT_SYMBOL_NUL.to_bytes_with_nul())
    }
    .map_err(|error| {
        PluginError::contract(
            path,
            ContractViolation::MissingSymbol {
                message: error.to_string(),
            },
        )
    })?;

    let header_ptr: *const DeclarationHeader = *symbol;
    if header_ptr.is_null() {
        return Err(PluginError::contract(path, ContractViolation::NullSymbol));
    }

    // SAFETY: `Export` is at least as large as the fixed-layout header in
    // every ABI version; a foreign symbol of another shape is rejected by the
    // magic check before any further field is used.
    let header = unsafe { header_ptr.read_unaligned() };
    header
        .verify()
        .map_err(|mismatch| PluginError::contract(path, mismatch))?;

    // SAFETY: the header announced this ABI version and declaration size, so
    // the symbol is a `CommandDeclaration` emitted by `export_command!`.
    let declaration = unsafe { &*header_ptr.cast::<CommandDeclaration>() };
    declaration
        .verify()
        .map_err(|mismatch| PluginError::contract(path, mismatch))
}
