use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_dynmenu"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &Path, parent_shortcut: &str, exit_command: &str) {
    let cfg = format!(
        r#"{{
      "parent_shortcut": {{ "value": "{parent_shortcut}", "description": "up" }},
      "exit_command": {{ "value": "{exit_command}", "description": "leave" }},
      "prompt_suffix": {{ "value": "> ", "description": "suffix" }},
      "file_logging_enabled": {{ "value": "True", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn run_with_input(dir: &Path, input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

/// Prompts carry no newline, so split on them to get one entry per
/// rendered prompt or printed line.
pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .split(['\n', '\r'])
        .flat_map(|line| line.split("> "))
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
