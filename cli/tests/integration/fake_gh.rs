//! A stand-in `gh` for end-to-end tests.
//!
//! `codespace ssh` runs the remote command with `bash` inside a private
//! directory, or stands in for an interactive session when no command is
//! given. Other codespace subcommands return canned answers. Every
//! invocation is appended to a log file.

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/bash
printf '%s\n' "$*" >> "$FAKE_GH_LOG"
case "$1 $2" in
  "codespace ssh")
    if [ "$#" -lt 6 ]; then
      echo "interactive session on $4"
      exit "${FAKE_SESSION_EXIT:-0}"
    fi
    cd "$FAKE_CODESPACE_HOME" || exit 1
    exec bash -c "$6"
    ;;
  "codespace list")
    cat "$FAKE_GH_DIR/codespaces.json"
    ;;
  "codespace create")
    echo "cs-new"
    ;;
  "codespace stop"|"codespace delete"|"codespace rebuild")
    ;;
  *)
    echo "unsupported: $*" >&2
    exit 1
    ;;
esac
"#;

pub struct FakeGh {
    dir: TempDir,
}

impl FakeGh {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        for sub in ["home", "codespace"] {
            std::fs::create_dir(dir.path().join(sub)).expect("mkdir");
        }
        let gh = dir.path().join("gh");
        std::fs::write(&gh, SCRIPT).expect("write gh");
        std::fs::set_permissions(&gh, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        let fake = Self { dir };
        fake.use_gh(&gh);
        fake.set_codespaces("[]");
        fake
    }

    /// Point `gh.path` in the isolated config at `program`.
    pub fn use_gh(&self, program: &Path) {
        std::fs::write(
            self.config_path(),
            format!("gh:\n  path: \"{}\"\n", program.display()),
        )
        .expect("write config");
    }

    pub fn set_codespaces(&self, json: &str) {
        std::fs::write(self.dir.path().join("codespaces.json"), json).expect("write fixture");
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Files left in the stand-in codespace's working directory.
    pub fn codespace_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path().join("codespace"))
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Every `gh` invocation so far, one argument list per line.
    pub fn log(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("gh.log")).unwrap_or_default()
    }

    /// `csm` wired to this stand-in.
    pub fn csm(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("csm"));
        cmd.env("NO_COLOR", "1")
            .env("CSM_CONFIG", self.config_path())
            .env("HOME", self.home())
            .env("FAKE_GH_DIR", self.dir.path())
            .env("FAKE_GH_LOG", self.dir.path().join("gh.log"))
            .env("FAKE_CODESPACE_HOME", self.dir.path().join("codespace"))
            .env_remove("CI")
            .env_remove("CSM_YES");
        cmd
    }
}
