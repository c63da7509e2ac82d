use std::fs;

use crate::common::{
    make_temp_dir, normalized_lines, read_log_contents, run_with_input, write_config,
};

#[test]
fn custom_shortcut_and_exit_command_are_honoured() {
    let dir = make_temp_dir("config");
    write_config(&dir, "up", "quit");
    let output = run_with_input(&dir, "sub\n..\nup\nquit\nanswer 1\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert_eq!(lines, vec!["cli", "sub", "sub", "cli"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Command resolution failed for '..'"));
}

#[test]
fn file_logging_can_be_disabled() {
    let dir = make_temp_dir("config");
    let cfg = r#"{ "file_logging_enabled": { "value": "False", "description": "file logging" } }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
    let output = run_with_input(&dir, "qux\nexit\n");
    assert!(output.status.success());
    assert!(read_log_contents(&dir).is_none());
}

#[test]
fn malformed_config_aborts_startup() {
    let dir = make_temp_dir("config");
    fs::write(dir.join("config.json"), "{").unwrap();
    let output = run_with_input(&dir, "exit\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON"), "stderr: {stderr}");
}

#[test]
fn spaced_shortcut_is_rejected() {
    let dir = make_temp_dir("config");
    write_config(&dir, "go up", "exit");
    let output = run_with_input(&dir, "exit\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("single word"), "stderr: {stderr}");
}

#[test]
fn settings_menu_persists_changes() {
    let dir = make_temp_dir("config");
    let output = run_with_input(
        &dir,
        "settings set exit_command quit\nsettings show\nsettings set colour on\nexit\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved exit_command"), "stdout: {stdout}");
    assert!(stdout.contains("EXIT_COMMAND = quit"), "stdout: {stdout}");
    assert!(stdout.contains("PARENT_SHORTCUT = .."), "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Command execution failed for 'set'"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("Unknown configuration key 'colour'"));

    let saved = fs::read_to_string(dir.join("config.json")).unwrap();
    assert!(saved.contains("\"quit\""));

    // The running session keeps its exit command; the next one uses the new one.
    let next = run_with_input(&dir, "exit\nanswer 7\nquit\n");
    let stdout = String::from_utf8_lossy(&next.stdout);
    assert!(stdout.contains("The answer is: 7"), "stdout: {stdout}");
}
