use std::{
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

/// The exit is the only spawnable tile, so both entities start on it.
fn tiny_trap() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/tiny_trap.txt")
        .display()
        .to_string()
}

fn play(extra: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dungeon-chase"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--map", &tiny_trap(), "--seed", "7"])
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch dungeon-chase");

    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("failed to write session input");
    child.wait_with_output().expect("failed to await dungeon-chase")
}

#[test]
fn sharing_a_tile_with_the_bot_loses_even_on_the_exit() {
    let output = play(&["--difficulty", "godlike"], "HELLO\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("You have selected the GODLIKE difficulty!"));
    assert!(stdout.contains("You need 0 gold to escape this dungeon..."));
    assert!(stdout.contains("Now be careful as you enter the TINY TRAP!"));
    assert!(stdout.contains("Gold to win: 0\n"));
    assert!(stdout.ends_with("LOSE\n"));
}

#[test]
fn custom_difficulty_asks_for_a_weighting() {
    let output = play(&["--difficulty", "custom"], "0\n6\nLOOK\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains(
        "Please make sure to type in a difficulty between 1 and 10! Please try again..."
    ));
    assert!(stdout.contains("Custom difficulty level is set at 6"));
    assert!(stdout.contains("#####\n#####\n##P##\n#####\n#####\n"));
    assert!(stdout.ends_with("LOSE\n"));
}

#[test]
fn closed_input_aborts_the_session() {
    let output = play(&["--difficulty", "easy"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("standard input closed"));
}

#[test]
fn out_of_range_weighting_flag_is_rejected() {
    let output = play(&["--difficulty", "custom", "--weighting", "11"], "");
    assert!(!output.status.success());
}
