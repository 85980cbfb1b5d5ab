//! Crate-level integration and BDD tests.

use std::fs;

use tempfile::TempDir;

use crate::loader::{DynamicLoader, ModuleLoader};
use crate::locator::PluginLocator;


#[test]
fn discovered_module_that_is_not_a_library_fails_to_load() {
    let dir = TempDir::new().expect("temporary directory");
    fs::write(dir.path().join("toolx.deploy.so"), b"not a library").expect("write module");

    let registry = PluginLocator::new(dir.path(), "toolx")
        .with_extension("so")
        .discover()
        .expect("discovery succeeds");
    let path = registry.resolve("deploy").expect("deploy is registered");

    let Err(error) = DynamicLoader.load(path) else {
        panic!("garbage module must not load");
    };
    assert!(
        error.to_string().contains("toolx.deploy.so"),
        "unexpected error: {error}"
    );
}
