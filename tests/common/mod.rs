#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn diary_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nicediary").unwrap();
    cmd.env_remove("NICEDIARY_ROOT");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a diary at `path` and write the given `(date, text)` entries
pub fn seed(path: &Path, entries: &[(&str, &str)]) {
    diary_cmd().arg("init").arg(path).assert().success();
    for (date, text) in entries {
        diary_cmd()
            .current_dir(path)
            .args(["write", date, "--text", text])
            .assert()
            .success();
    }
}
