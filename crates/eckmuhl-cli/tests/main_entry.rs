//! Integration tests for the `eckmuhl` binary entry point.
//!
//! Each test installs a copy of the binary under the name `toolx` in a
//! temporary directory, next to fixture plugin files, and runs it there.

use std::env::consts::{DLL_EXTENSION, DLL_PREFIX, EXE_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const HOST: &str = "toolx";

struct Install {
    dir: TempDir,
}

impl Install {
    fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        fs::copy(
            env!("CARGO_BIN_EXE_eckmuhl"),
            dir.path().join(format!("{HOST}{EXE_SUFFIX}")),
        )?;
        Ok(Self { dir })
    }

    fn module_path(&self, host: &str, name: &str) -> PathBuf {
        self.dir
            .path()
            .join(format!("{host}.{name}.{DLL_EXTENSION}"))
    }

    fn placeholder(&self, name: &str, contents: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.module_path(HOST, name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn host(&self) -> Command {
        Command::new(self.dir.path().join(format!("{HOST}{EXE_SUFFIX}")))
    }
}

/// Path of the echo plugin library built alongside this test.
///
/// `eckmuhl-plugin-echo` is a dev-dependency, so its `cdylib` is either
/// uplifted beside the binary or left hashed under `deps/`.
fn echo_library() -> PathBuf {
    let profile_dir = Path::new(env!("CARGO_BIN_EXE_eckmuhl"))
        .parent()
        .expect("binary has a parent directory");
    let stem = format!("{DLL_PREFIX}eckmuhl_plugin_echo");
    let exact = profile_dir.join(format!("{stem}.{DLL_EXTENSION}"));
    if exact.is_file() {
        return exact;
    }
    fs::read_dir(profile_dir.join("deps"))
        .expect("deps directory is readable")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.extension().and_then(|ext| ext.to_str()) == Some(DLL_EXTENSION)
                && path
                    .file_name()
                    .and_then(|file| file.to_str())
                    .is_some_and(|file| file.starts_with(&stem))
        })
        .unwrap_or_else(|| {
            panic!(
                "{stem}.{DLL_EXTENSION} not found under {}",
                profile_dir.display()
            )
        })
}

fn expected_help(commands: &[&str]) -> String {
    let mut text = String::from(
        "\nThe command line client\n\
         ================================================================================\n\
         Usage: toolx [command [options]]\n\nAvailable commands:\n",
    );
    for command in commands {
        text.push_str(&format!("  {command}\n"));
    }
    text.push_str(
        "--------------------------------------------------------------------------------\n  \
         Use 'toolx [command] --help' for more information about a command.\n\
         ================================================================================\n\n",
    );
    text
}

#[test]
fn help_lists_installed_plugins() -> anyhow::Result<()> {
    let install = Install::new()?;
    install.placeholder("deploy", b"")?;
    install.placeholder("build", b"")?;
    fs::write(install.dir.path().join("other.lint.so"), b"")?;

    let expected = expected_help(&["build", "deploy", "version"]);
    install
        .host()
        .assert()
        .success()
        .stdout(expected.clone())
        .stderr("");
    install
        .host()
        .arg("--help")
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

#[test]
fn version_prints_the_build_block() -> anyhow::Result<()> {
    let install = Install::new()?;
    install
        .host()
        .arg("version")
        .assert()
        .success()
        .stdout(contains("\n  eckmuhl\n").and(contains("  built at : ")))
        .stderr("");
    Ok(())
}

#[test]
fn unknown_command_exits_with_failure() -> anyhow::Result<()> {
    let install = Install::new()?;
    install
        .host()
        .arg("nope")
        .assert()
        .code(1)
        .stdout("")
        .stderr("Error: cmd=nope >>> this command does not exist\n");
    Ok(())
}

#[test]
fn broken_module_is_a_load_failure() -> anyhow::Result<()> {
    let install = Install::new()?;
    let module = install.placeholder("broken", b"not a library")?;
    install
        .host()
        .arg("broken")
        .assert()
        .code(1)
        .stderr(
            contains("Error: cmd=broken >>> failed to load plugin")
                .and(contains(module.display().to_string())),
        );
    Ok(())
}

#[test]
fn echo_plugin_runs_with_residual_arguments() -> anyhow::Result<()> {
    let library = echo_library();
    let install = Install::new()?;
    fs::copy(&library, install.module_path(HOST, "echo"))?;

    install
        .host()
        .args(["echo", "hello", "world"])
        .assert()
        .success()
        .stdout("hello world\n")
        .stderr("");
    install
        .host()
        .args(["echo", "--help"])
        .assert()
        .success()
        .stdout(contains("Usage: echo"))
        .stderr("");
    install
        .host()
        .args(["echo", "--fail", "boom"])
        .assert()
        .code(1)
        .stderr("Error: cmd=echo >>> boom\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_host_uses_the_link_name() -> anyhow::Result<()> {
    let install = Install::new()?;
    install.placeholder("build", b"")?;
    fs::write(install.module_path("alias", "status"), b"")?;
    let link = install.dir.path().join("alias");
    std::os::unix::fs::symlink(install.dir.path().join(HOST), &link)?;

    Command::new(&link)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("  status\n").and(contains("  build\n").not()));
    Ok(())
}
