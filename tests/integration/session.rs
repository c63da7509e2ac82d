use crate::common::{make_temp_dir, normalized_lines, read_log_contents, run_with_input};

#[test]
fn exits_cleanly_without_config_file() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "exit\n");
    assert!(output.status.success());
    assert!(!dir.join("config.json").exists());
}

#[test]
fn notifying_menu_passes_selected_alias_to_commands() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "bar\nhello\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bar> "), "prompt did not follow alias: {stdout}");
    assert!(stdout.contains("Hello, from bar"), "stdout: {stdout}");
}

#[test]
fn alias_and_command_on_one_line_stay_at_root() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "baz hello\nexit\n");
    let lines = normalized_lines(&output.stdout);
    assert_eq!(lines, vec!["cli", "Hello, from baz", "cli"]);
}

#[test]
fn parent_shortcut_walks_back_up() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "sub\nsubsub\nhello\n..\n..\nexit\n");
    let lines = normalized_lines(&output.stdout);
    assert_eq!(
        lines,
        vec!["cli", "sub", "subsub", "Hello, subsub", "subsub", "sub", "cli"]
    );
}

#[test]
fn unknown_command_is_reported_on_stderr() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "qux\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Command resolution failed for 'qux'"),
        "stderr: {stderr}"
    );
    let log = read_log_contents(&dir).expect("session log should exist");
    assert!(log.contains("Command run: qux"));
}

#[test]
fn failing_action_is_reported_on_stderr() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "answer many\nanswer 42\nexit\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Command execution failed for 'answer'"),
        "stderr: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("The answer is: 42"));
}

#[test]
fn connected_hosts_become_menus() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "db\nconnect db\ndb\nping\n..\ndisconnect db\ndb\nexit\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Connected db"));
    assert!(stdout.contains("db> pong"), "stdout: {stdout}");
    assert!(stdout.contains("Disconnected db"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("Command resolution failed for 'db'").count(),
        2,
        "stderr: {stderr}"
    );
}

#[test]
fn help_lists_every_reachable_entry() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "connect web\nhelp\nexit\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Commands available:"));
    assert!(stdout.contains(" - answer <int>"));
    assert!(stdout.contains(" - foo\n\tMenu reachable as foo, bar or baz"));
    assert!(stdout.contains(" - baz\n"));
    assert!(stdout.contains(" - host {web}\n\tEnter a connected host"));
}

#[test]
fn trailing_tab_prints_completions() {
    let dir = make_temp_dir("session");
    let output = run_with_input(&dir, "ba\t\nbar h\t\nexit\n");
    let lines = normalized_lines(&output.stdout);
    // The first alias the line could spell wins.
    assert_eq!(lines, vec!["cli", "bar", "cli", "bar hello", "cli"]);
}
