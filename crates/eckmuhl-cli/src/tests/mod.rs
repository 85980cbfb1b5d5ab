//! Crate-level tests for the host shell.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

use eckmuhl_command::{Command, CommandError, CommandResult, Outcome};
use eckmuhl_plugins::{ContractViolation, ModuleLoader, PluginError, PluginLocator};
use rstest::rstest;
use tempfile::TempDir;

use crate::build_info::BuildInfo;
use crate::dispatcher::Dispatcher;
use crate::{run, run_with_dispatcher};


/// Command names paired with the arguments each run received.
pub(crate) type Received = Vec<(String, Vec<String>)>;

/// What a scripted plugin does when loaded and run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Script {
    Complete,
    Stop,
    Fail(String),
    NoExport,
}

/// Loader standing in for the platform linker: modules are looked up by
/// command name and every received argument list is recorded.
pub(crate) struct ScriptedLoader {
    scripts: HashMap<String, Script>,
    received: Rc<RefCell<Received>>,
}

impl ScriptedLoader {
    pub(crate) fn new(
        scripts: HashMap<String, Script>,
        received: Rc<RefCell<Received>>,
    ) -> Self {
        Self { scripts, received }
    }
}

impl ModuleLoader for ScriptedLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Command>, PluginError> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.split_once('.'))
            .map_or("", |(_, name)| name);
        let script = self.scripts.get(name).cloned().unwrap_or(Script::Complete);
        if script == Script::NoExport {
            return Err(PluginError::ContractViolation {
                path: path.to_path_buf(),
                violation: ContractViolation::MissingSymbol {
                    message: String::from("undefined symbol: Export"),
                },
            });
        }
        Ok(Box::new(ScriptedCommand {
            name: name.to_owned(),
            script,
            received: Rc::clone(&self.received),
        }))
    }
}

struct ScriptedCommand {
    name: String,
    script: Script,
    received: Rc<RefCell<Received>>,
}

impl Command for ScriptedCommand {
    fn run(&mut self, args: &[String]) -> CommandResult {
        self.received
            .borrow_mut()
            .push((self.name.clone(), args.to_vec()));
        match &self.script {
            Script::Complete | Script::NoExport => Ok(Outcome::Completed),
            Script::Stop => Ok(Outcome::Stopped),
            Script::Fail(message) => Err(CommandError::new(message.clone())),
        }
    }
}

/// Captured result of one host run.
pub(crate) struct HostRun {
    pub(crate) exit: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// Runs the host shell for `argv` against plugins installed in `dir`.
pub(crate) fn run_host(dir: &Path, loader: ScriptedLoader, argv: &[String]) -> HostRun {
    let locator = PluginLocator::new(dir, "toolx").with_extension("so");
    let dispatcher = Dispatcher::new(locator, loader, BuildInfo::new("1.0.0", "0"), 2026);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = run_with_dispatcher(&dispatcher, argv, &mut stdout, &mut stderr);
    HostRun {
        exit,
        stdout: String::from_utf8(stdout).expect("utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf8 stderr"),
    }
}

pub(crate) fn argv(line: &str) -> Vec<String> {
    std::iter::once("toolx")
        .chain(line.split_whitespace())
        .map(str::to_owned)
        .collect()
}

fn scripted(name: &str, script: Script) -> ScriptedLoader {
    ScriptedLoader::new(
        HashMap::from([(name.to_owned(), script)]),
        Rc::default(),
    )
}

fn install(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temporary directory");
    for name in names {
        std::fs::write(dir.path().join(format!("toolx.{name}.so")), b"").expect("plugin file");
    }
    dir
}

#[rstest]
#[case::bare("")]
#[case::help("help")]
#[case::version("version")]
fn built_ins_succeed_quietly(#[case] line: &str) {
    let dir = install(&["build"]);
    let result = run_host(dir.path(), scripted("build", Script::Complete), &argv(line));
    assert_eq!(result.exit, ExitCode::SUCCESS);
    assert!(!result.stdout.is_empty());
    assert!(result.stderr.is_empty());
}

#[test]
fn stop_exits_zero_without_output() {
    let dir = install(&["deploy"]);
    let result = run_host(dir.path(), scripted("deploy", Script::Stop), &argv("deploy"));
    assert_eq!(result.exit, ExitCode::SUCCESS);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
}

#[test]
fn failures_print_a_single_error_line() {
    let dir = install(&["deploy"]);
    let loader = scripted("deploy", Script::Fail(String::from("target is locked")));
    let result = run_host(dir.path(), loader, &argv("deploy prod"));
    assert_eq!(result.exit, ExitCode::FAILURE);
    assert_eq!(result.stderr, "Error: cmd=deploy >>> target is locked\n");
}

#[test]
fn failures_without_a_command_name_leave_it_blank() {
    let dir = TempDir::new().expect("temporary directory");
    let missing = dir.path().join("gone");
    let result = run_host(&missing, scripted("build", Script::Complete), &argv(""));
    assert_eq!(result.exit, ExitCode::FAILURE);
    assert!(
        result.stderr.starts_with("Error: cmd= >>> failed to scan plugin directory"),
        "unexpected stderr: {}",
        result.stderr
    );
}

#[test]
fn run_reports_version_from_the_real_process() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let args = ["toolx", "--version"].map(OsString::from);
    let exit = run(args, &mut stdout, &mut stderr);
    let text = String::from_utf8(stdout).expect("utf8");
    assert_eq!(exit, ExitCode::SUCCESS);
    assert!(text.contains("  eckmuhl\n"), "unexpected output: {text}");
    assert!(stderr.is_empty());
}

#[test]
fn run_rejects_unknown_commands() {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let args = ["toolx-absent-host", "nope"].map(OsString::from);
    let exit = run(args, &mut stdout, &mut stderr);
    assert_eq!(exit, ExitCode::FAILURE);
    assert_eq!(
        String::from_utf8(stderr).expect("utf8"),
        "Error: cmd=nope >>> this command does not exist\n"
    );
}
