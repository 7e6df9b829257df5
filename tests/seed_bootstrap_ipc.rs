use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar_with(envs: &[(&str, &str)]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_attendanced");
    let mut child = Command::new(exe)
        .env_remove("ATTENDANCED_WORKSPACE")
        .env_remove("ATTENDANCED_QUOTA_BYTES")
        .env_remove("ATTENDANCED_SEED")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn attendanced");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

fn count(v: &serde_json::Value, key: &str) -> usize {
    v[key].as_array().map(|a| a.len()).unwrap_or(0)
}

fn select(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    workspace: &PathBuf,
) -> serde_json::Value {
    request_ok(
        stdin,
        reader,
        id,
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    )
}

#[test]
fn reopening_a_seeded_workspace_does_not_duplicate_defaults() {
    let workspace = temp_dir("attendanced-seed-twice");
    let (mut child, mut stdin, mut reader) = spawn_sidecar_with(&[]);

    let first = select(&mut stdin, &mut reader, "1", &workspace);
    assert_eq!(first["seeded"]["users"], json!(3));
    let second = select(&mut stdin, &mut reader, "2", &workspace);
    assert_eq!(second["seeded"], json!({ "users": 0, "teachers": 0, "classes": 0 }));

    let users = request_ok(&mut stdin, &mut reader, "3", "users.list", json!({}));
    assert_eq!(count(&users, "users"), 3);
    let teachers = request_ok(&mut stdin, &mut reader, "4", "teachers.list", json!({}));
    assert_eq!(count(&teachers, "teachers"), 1);
    assert_eq!(teachers["teachers"][0]["teacherId"], json!("T001"));
    let classes = request_ok(&mut stdin, &mut reader, "5", "classes.list", json!({}));
    assert_eq!(count(&classes, "classes"), 3);
    assert_eq!(
        classes["classes"][0]["subjects"],
        json!(["Mathematics", "Science", "English", "History", "Geography"])
    );

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn seeding_can_be_disabled() {
    let workspace = temp_dir("attendanced-seed-off");
    let (mut child, mut stdin, mut reader) = spawn_sidecar_with(&[("ATTENDANCED_SEED", "false")]);

    let selected = select(&mut stdin, &mut reader, "1", &workspace);
    assert_eq!(selected["seeded"]["users"], json!(0));
    let login = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "email": "admin@school.com", "role": "admin" }),
    );
    assert_eq!(login["success"], json!(false));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn workspace_from_environment_opens_at_startup() {
    let workspace = temp_dir("attendanced-seed-env");
    let path = workspace.to_string_lossy().to_string();
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar_with(&[("ATTENDANCED_WORKSPACE", path.as_str())]);

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["workspacePath"], json!(path));
    let classes = request_ok(&mut stdin, &mut reader, "2", "classes.list", json!({}));
    assert_eq!(count(&classes, "classes"), 3);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn quota_rejection_leaves_collection_stale() {
    let workspace = temp_dir("attendanced-seed-quota");
    // Enough for the default seed, not for a large class on top.
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar_with(&[("ATTENDANCED_QUOTA_BYTES", "4096")]);
    let _ = select(&mut stdin, &mut reader, "1", &workspace);

    let subjects: Vec<String> = (0..400).map(|i| format!("Subject number {}", i)).collect();
    // The write is dropped, but the caller still sees success.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "Huge", "subjects": subjects }),
    );
    let classes = request_ok(&mut stdin, &mut reader, "3", "classes.list", json!({}));
    assert_eq!(count(&classes, "classes"), 3);

    let bad = request(&mut stdin, &mut reader, "4", "classes.get", json!({ "id": "" }));
    assert_eq!(error_code(&bad), Some("bad_params"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn invalid_config_stops_startup() {
    let (mut child, stdin, mut reader) =
        spawn_sidecar_with(&[("ATTENDANCED_QUOTA_BYTES", "lots")]);
    drop(stdin);
    let status = child.wait().expect("wait");
    assert!(!status.success());
    let mut line = String::new();
    let n = reader.read_line(&mut line).expect("read");
    assert_eq!(n, 0);
}
