use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    time::{SystemTime, UNIX_EPOCH},
};

const MAP: &str = "(0,0),(3,0),(3,3),(0,3)#(1,1)##B(1,2)\n";

fn temp_dir(prefix: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("duration")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("wrapper-cli-tests-{prefix}-{unique}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn wrapper() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wrapper"))
}

#[test]
fn inline_script_prints_text_summary_and_grid() {
    let dir = temp_dir("text");
    let map = write(&dir, "map.desc", MAP);

    let output = wrapper()
        .arg("--map")
        .arg(&map)
        .args(["--script", "WAS", "--render"])
        .output()
        .expect("run wrapper");
    let _ = fs::remove_dir_all(&dir);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("actions applied: 3"), "{stdout}");
    assert!(stdout.contains("position: (0, 1)"), "{stdout}");
    assert!(stdout.contains("B=1"), "{stdout}");
    assert!(stdout.ends_with("WWW\nWWW\n WW\n"), "{stdout}");
}

#[test]
fn actions_file_and_config_produce_json_summary() {
    let dir = temp_dir("json");
    let map = write(&dir, "map.desc", MAP);
    let actions = write(&dir, "run.sol", "Q\n");
    let config = write(
        &dir,
        "wrapper.toml",
        "[loadout]\norientation = \"down\"\ntentacles = [{ x = 1, y = 0 }]\n",
    );

    let output = wrapper()
        .arg("--map")
        .arg(&map)
        .arg("--actions")
        .arg(&actions)
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .output()
        .expect("run wrapper");
    let _ = fs::remove_dir_all(&dir);

    assert!(output.status.success(), "{output:?}");
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(summary["orientation"], "right");
    assert_eq!(summary["tentacles"], 1);
    assert_eq!(summary["coverage"]["wrapped"], 3);
}

#[test]
fn rejected_action_reports_its_position() {
    let dir = temp_dir("rejected");
    let map = write(&dir, "map.desc", MAP);

    let output = wrapper()
        .arg("--map")
        .arg(&map)
        .args(["--script", "DD"])
        .output()
        .expect("run wrapper");
    let _ = fs::remove_dir_all(&dir);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("action #2 `D` was rejected"), "{stderr}");
}

#[test]
fn invalid_map_is_reported() {
    let dir = temp_dir("invalid-map");
    let map = write(&dir, "map.desc", "(1,1),(3,1),(3,3)#(2,2)##");

    let output = wrapper().arg("--map").arg(&map).output().expect("run wrapper");
    let _ = fs::remove_dir_all(&dir);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("invalid map"), "{stderr}");
}

#[test]
fn booster_on_obstacle_is_reported() {
    let dir = temp_dir("blocked-booster");
    let map = write(
        &dir,
        "map.desc",
        "(0,0),(3,0),(3,3),(0,3)#(0,0)#(1,1),(2,1),(2,2),(1,2)#F(1,1)",
    );

    let output = wrapper().arg("--map").arg(&map).output().expect("run wrapper");
    let _ = fs::remove_dir_all(&dir);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("booster F at (1, 1) is placed on Obstacle"), "{stderr}");
}
