use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;

use tempfile::TempDir;

/// A scratch directory the binary runs in, isolated from the user's config.
pub struct SaveitWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    config_home: PathBuf,
}

impl SaveitWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().join("project");
        let config_home = temp_dir.path().join("config");
        fs::create_dir_all(&root).expect("project dir");
        fs::create_dir_all(&config_home).expect("config dir");
        Self {
            temp_dir,
            root,
            config_home,
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(".saveit/issues.jsonl")
    }

    pub fn write_config(&self, yaml: &str) {
        let dir = self.root.join(".saveit");
        fs::create_dir_all(&dir).expect("workspace dir");
        fs::write(dir.join("config.yaml"), yaml).expect("write config");
    }

    pub fn data_lines(&self) -> Vec<String> {
        fs::read_to_string(self.data_file())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("saveit").expect("saveit binary");
        cmd.current_dir(&self.root)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("HOME", self.temp_dir.path())
            .env_remove("SAVEIT_DATA_FILE")
            .env_remove("SAVEIT_AUTOSAVE")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

fn capture(label: &str, output: &std::process::Output) -> RunOutput {
    let run = RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !run.status.success() {
        eprintln!("[{label}] exited with {}\n{}", run.status, run.stderr);
    }
    run
}

pub fn run_saveit<I, S>(workspace: &SaveitWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = workspace
        .command()
        .args(args)
        .output()
        .expect("run saveit");
    capture(label, &output)
}

pub fn run_saveit_with_env<I, S>(
    workspace: &SaveitWorkspace,
    args: I,
    env: &[(&str, &str)],
    label: &str,
) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = workspace.command();
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.args(args).output().expect("run saveit");
    capture(label, &output)
}

/// Feed `script` to `saveit shell`.
pub fn run_shell(workspace: &SaveitWorkspace, script: &str, label: &str) -> RunOutput {
    let output = workspace
        .command()
        .arg("shell")
        .write_stdin(script)
        .output()
        .expect("run saveit shell");
    capture(label, &output)
}

pub fn seed(workspace: &SaveitWorkspace, issues: &[(&str, &str)]) {
    for (statement, description) in issues {
        let out = run_saveit(workspace, ["add", statement, description], "seed");
        assert!(out.status.success(), "seed failed: {}", out.stderr);
    }
}
