use similar_asserts::SimpleDiff;
use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};
use tempfile::TempDir;

/// The dependency package every project stages.
pub const DEPENDENCY_PACKAGE: &str = "@openzeppelin";

/// Environment variable the fake tools append their command lines to.
pub const TOOL_LOG_ENV: &str = "FAKE_TOOL_LOG";

/// Environment variable naming a fake tool that should exit with an error.
pub const TOOL_FAIL_ENV: &str = "FAKE_TOOL_FAIL";

/// Stand-ins for the external binaries wrap3 drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FakeTool {
    Solc,
    Web3j,
    Abigen,
}

impl FakeTool {
    pub const ALL: [Self; 3] = [Self::Solc, Self::Web3j, Self::Abigen];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Solc => "solc",
            Self::Web3j => "web3j",
            Self::Abigen => "abigen",
        }
    }

    /// The variable that points wrap3 at this tool.
    pub fn env_key(self) -> String {
        format!("WRAP3_{}", self.name().to_uppercase())
    }

    fn script(self) -> &'static str {
        match self {
            Self::Solc => FAKE_SOLC,
            Self::Web3j => FAKE_WEB3J,
            Self::Abigen => FAKE_ABIGEN,
        }
    }
}

/// Behaves like `solc <src> --bin --abi --overwrite -o <out>`, refusing sources that still
/// import the package by its bare name.
const FAKE_SOLC: &str = r#"#!/bin/sh
[ -n "$FAKE_TOOL_LOG" ] && echo "solc $*" >> "$FAKE_TOOL_LOG"
if [ "$FAKE_TOOL_FAIL" = "solc" ]; then
    echo "Error: ParserError: Expected pragma, import directive or contract definition." >&2
    exit 1
fi
src="$1"
for arg in "$@"; do out="$arg"; done
if grep -rq --include='*.sol' 'import "@openzeppelin' "$(dirname "$src")"; then
    echo "Error: Source \"@openzeppelin\" not found: File not found." >&2
    exit 1
fi
[ -f "$src" ] || { echo "Error: $src not found" >&2; exit 1; }
name=$(basename "$src" .sol)
mkdir -p "$out"
printf '6080604052%s' "$name" > "$out/$name.bin"
printf '[{"type":"constructor","name":"%s"}]' "$name" > "$out/$name.abi"
"#;

/// Behaves like `web3j generate solidity -b <bin> -a <abi> -o <out> -p <package>`.
const FAKE_WEB3J: &str = r#"#!/bin/sh
[ -n "$FAKE_TOOL_LOG" ] && echo "web3j $*" >> "$FAKE_TOOL_LOG"
if [ "$FAKE_TOOL_FAIL" = "web3j" ]; then
    echo "web3j: unable to read abi" >&2
    exit 1
fi
while [ $# -gt 0 ]; do
    case "$1" in
        -b) bin="$2"; shift ;;
        -a) abi="$2"; shift ;;
        -o) out="$2"; shift ;;
        -p) pkg="$2"; shift ;;
    esac
    shift
done
[ -f "$bin" ] && [ -f "$abi" ] || { echo "web3j: missing artifacts" >&2; exit 1; }
name=$(basename "$bin" .bin)
dir="$out/$(echo "$pkg" | tr . /)"
mkdir -p "$dir"
printf 'package %s;\n\npublic class %s {}\n' "$pkg" "$name" > "$dir/$name.java"
"#;

/// Behaves like `abigen --bin=<bin> --abi=<abi> --out=<file> --pkg=<package>`.
const FAKE_ABIGEN: &str = r#"#!/bin/sh
[ -n "$FAKE_TOOL_LOG" ] && echo "abigen $*" >> "$FAKE_TOOL_LOG"
if [ "$FAKE_TOOL_FAIL" = "abigen" ]; then
    echo "abigen: invalid package name" >&2
    exit 1
fi
for arg in "$@"; do
    case "$arg" in
        --bin=*) bin="${arg#--bin=}" ;;
        --abi=*) abi="${arg#--abi=}" ;;
        --out=*) out="${arg#--out=}" ;;
        --pkg=*) pkg="${arg#--pkg=}" ;;
    esac
done
[ -f "$bin" ] && [ -f "$abi" ] || { echo "abigen: missing artifacts" >&2; exit 1; }
printf 'package %s\n\n// %s\n' "$pkg" "$(cat "$abi")" > "$out"
"#;

/// Creates a new project and a command running the wrap3 binary at `bin` inside it.
pub fn setup_wrap3(name: &str, bin: impl Into<PathBuf>) -> (TestProject, TestCommand) {
    crate::init_tracing();
    let project = TestProject::new(name);
    let cmd = project.command(bin);
    (project, cmd)
}

/// A temporary project with a fake toolchain next to it.
///
/// ```text
/// <tmp>/
/// ├── project/     the project root, wrap3 runs here
/// ├── tools/       fake solc, web3j and abigen
/// └── tools.log    one line per tool invocation
/// ```
#[derive(Debug)]
pub struct TestProject {
    base: TempDir,
}

impl TestProject {
    pub fn new(name: &str) -> Self {
        let base = tempfile::Builder::new()
            .prefix(&format!("wrap3-{name}-"))
            .tempdir()
            .expect("failed to create temp dir");
        let project = Self { base };
        fs::create_dir_all(project.root()).unwrap();
        project.install_tools();
        trace!(root = ?project.root(), "created test project");
        project
    }

    /// The project root.
    pub fn root(&self) -> PathBuf {
        self.base.path().join("project")
    }

    /// Resolves `path` against the project root.
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root().join(path)
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.base.path().join("tools")
    }

    pub fn tool_path(&self, tool: FakeTool) -> PathBuf {
        self.tools_dir().join(tool.name())
    }

    pub fn tool_log_path(&self) -> PathBuf {
        self.base.path().join("tools.log")
    }

    /// Writes `contracts/<name>`.
    pub fn add_source(&self, name: &str, content: &str) -> PathBuf {
        self.write(Path::new("contracts").join(name), content)
    }

    /// Writes `node_modules/@openzeppelin/<name>`.
    pub fn add_dependency(&self, name: &str, content: &str) -> PathBuf {
        self.write(Path::new("node_modules").join(DEPENDENCY_PACKAGE).join(name), content)
    }

    /// Writes `wrap3.toml`.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("wrap3.toml", content)
    }

    /// Writes a file below the project root, creating its parents.
    pub fn write(&self, path: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.path(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Reads a file below the project root.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        let path = self.path(path);
        fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
    }

    /// The names of the entries of a directory below the project root, sorted.
    pub fn list(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let dir = self.path(dir);
        let mut names = fs::read_dir(&dir)
            .unwrap_or_else(|err| panic!("failed to list {dir:?}: {err}"))
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// The tool invocations logged so far, one command line per entry.
    pub fn tool_log(&self) -> Vec<String> {
        fs::read_to_string(self.tool_log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The names of the tools invoked so far, in order.
    pub fn tools_run(&self) -> Vec<String> {
        self.tool_log()
            .iter()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string))
            .collect()
    }

    /// Asserts that the scratch workspace is gone.
    #[track_caller]
    pub fn assert_no_workspace(&self) {
        let workspace = self.path("temp");
        assert!(!workspace.exists(), "workspace {workspace:?} was not removed");
    }

    /// Returns a command running `bin` in the project root with the fake tools configured.
    pub fn command(&self, bin: impl Into<PathBuf>) -> TestCommand {
        let mut cmd =
            TestCommand { bin: bin.into(), root: self.root(), env: Vec::new(), cmd: None };
        for tool in FakeTool::ALL {
            cmd.set_env(tool.env_key(), self.tool_path(tool));
        }
        cmd.set_env(TOOL_LOG_ENV, self.tool_log_path());
        cmd
    }

    fn install_tools(&self) {
        fs::create_dir_all(self.tools_dir()).unwrap();
        for tool in FakeTool::ALL {
            let path = self.tool_path(tool);
            fs::write(&path, tool.script()).unwrap();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            }
        }
    }
}

/// A `wrap3` invocation.
#[derive(Debug)]
pub struct TestCommand {
    bin: PathBuf,
    root: PathBuf,
    env: Vec<(String, PathBuf)>,
    cmd: Option<Command>,
}

impl TestCommand {
    /// Resets the command, keeping the environment set with [`Self::set_env`].
    pub fn fuse(&mut self) -> &mut Self {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(&self.root);
        for (key, _) in env::vars_os() {
            let inherited = key.to_str().is_some_and(|key| {
                key.starts_with("WRAP3_") || key.starts_with("FAKE_") || key == "RUST_LOG"
            });
            if inherited {
                cmd.env_remove(key);
            }
        }
        cmd.env("NO_COLOR", "1");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        self.cmd = Some(cmd);
        self
    }

    fn cmd(&mut self) -> &mut Command {
        if self.cmd.is_none() {
            self.fuse();
        }
        self.cmd.as_mut().unwrap()
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.cmd().arg(arg);
        self
    }

    pub fn args<I, A>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        self.cmd().args(args);
        self
    }

    /// Sets an environment variable for this and every fused command.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<PathBuf>) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        self.cmd().env(&key, &value);
        self.env.retain(|(k, _)| *k != key);
        self.env.push((key, value));
        self
    }

    /// Removes an environment variable for this and every fused command.
    pub fn unset_env(&mut self, key: &str) -> &mut Self {
        self.env.retain(|(k, _)| k != key);
        self.cmd().env_remove(key);
        self
    }

    /// Makes the given fake tool exit with an error.
    pub fn fail_tool(&mut self, tool: FakeTool) -> &mut Self {
        self.set_env(TOOL_FAIL_ENV, tool.name())
    }

    /// Runs the command and returns its output.
    pub fn output(&mut self) -> Output {
        let cmd = self.cmd();
        trace!(?cmd, "running");
        cmd.output().unwrap_or_else(|err| panic!("failed to run {cmd:?}: {err}"))
    }

    /// Runs the command, asserts it succeeded and returns its stdout.
    #[track_caller]
    pub fn assert_success(&mut self) -> String {
        let output = self.output();
        if !output.status.success() {
            panic!("command failed but expected success:\n{}", describe(&output));
        }
        output.stdout_lossy()
    }

    /// Runs the command, asserts it failed and returns its stderr.
    #[track_caller]
    pub fn assert_failure(&mut self) -> String {
        let output = self.output();
        if output.status.success() {
            panic!("command succeeded but expected failure:\n{}", describe(&output));
        }
        output.stderr_lossy()
    }

    /// Runs the command, asserts it exited with `code` and returns its stderr.
    #[track_caller]
    pub fn assert_code(&mut self, code: i32) -> String {
        let output = self.output();
        if output.status.code() != Some(code) {
            panic!("expected exit code {code}:\n{}", describe(&output));
        }
        output.stderr_lossy()
    }

    /// Runs the command and asserts it printed something on stdout.
    #[track_caller]
    pub fn assert_non_empty_stdout(&mut self) {
        let stdout = self.assert_success();
        assert!(!stdout.trim().is_empty(), "expected output on stdout");
    }

    /// Runs the command and asserts it printed nothing on stdout.
    #[track_caller]
    pub fn assert_empty_stdout(&mut self) {
        let stdout = self.assert_success();
        assert!(stdout.trim().is_empty(), "expected no output on stdout, got:\n{stdout}");
    }

    pub fn stdout_lossy(&mut self) -> String {
        self.output().stdout_lossy()
    }

    pub fn stderr_lossy(&mut self) -> String {
        self.output().stderr_lossy()
    }
}

/// Extension trait for [`Output`].
pub trait OutputExt {
    fn stdout_lossy(&self) -> String;

    fn stderr_lossy(&self) -> String;

    /// Asserts stdout equals `expected`, ignoring trailing whitespace.
    fn assert_stdout_eq(&self, expected: &str);
}

impl OutputExt for Output {
    fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    #[track_caller]
    fn assert_stdout_eq(&self, expected: &str) {
        let stdout = self.stdout_lossy();
        let (actual, expected) = (stdout.trim_end(), expected.trim_end());
        if actual != expected {
            panic!("{}", SimpleDiff::from_str(actual, expected, "actual", "expected"));
        }
    }
}

fn describe(output: &Output) -> String {
    format!(
        "status: {}\nstdout:\n{}\nstderr:\n{}",
        output.status,
        output.stdout_lossy(),
        output.stderr_lossy()
    )
}
