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

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_attendanced");
    let mut child = Command::new(exe)
        .env_remove("ATTENDANCED_WORKSPACE")
        .env_remove("ATTENDANCED_QUOTA_BYTES")
        .env_remove("ATTENDANCED_SEED")
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

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("attendanced-router-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("workspacePath").map(|v| v.is_null()).unwrap_or(false));

    // Lists answer empty before a workspace exists; writes refuse.
    let classes = request_ok(&mut stdin, &mut reader, "2", "classes.list", json!({}));
    assert_eq!(classes["classes"], json!([]));
    let refused = request(
        &mut stdin,
        &mut reader,
        "3",
        "classes.create",
        json!({ "name": "X", "subjects": ["Y"] }),
    );
    assert_eq!(error_code(&refused), Some("no_workspace"));

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(selected["seeded"], json!({ "users": 3, "teachers": 1, "classes": 3 }));
    assert!(workspace.join("attendance.sqlite3").is_file());

    for (i, method) in [
        "users.list",
        "teachers.list",
        "classes.list",
        "students.list",
        "attendance.list",
        "grades.list",
        "auth.current",
    ]
    .iter()
    .enumerate()
    {
        let id = format!("5-{}", i);
        let v = request(&mut stdin, &mut reader, &id, method, json!({}));
        assert_eq!(v["ok"], json!(true), "{} failed: {}", method, v);
    }

    let unknown = request(&mut stdin, &mut reader, "6", "nope.method", json!({}));
    assert_eq!(error_code(&unknown), Some("not_implemented"));

    let missing = request(&mut stdin, &mut reader, "7", "workspace.select", json!({}));
    assert_eq!(error_code(&missing), Some("bad_params"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn malformed_line_gets_bad_json_and_the_loop_continues() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read error line");
    let v: serde_json::Value = serde_json::from_str(line.trim()).expect("parse error line");
    assert_eq!(error_code(&v), Some("bad_json"));

    let _ = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    drop(stdin);
    let _ = child.wait();
}

#[test]
fn store_clear_wipes_collections_and_session() {
    let workspace = temp_dir("attendanced-store-clear");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let login = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "email": "admin@school.com", "role": "admin" }),
    );
    assert_eq!(login["success"], json!(true));

    let _ = request_ok(&mut stdin, &mut reader, "3", "store.clear", json!({}));
    let users = request_ok(&mut stdin, &mut reader, "4", "users.list", json!({}));
    assert_eq!(users["users"], json!([]));
    let current = request_ok(&mut stdin, &mut reader, "5", "auth.current", json!({}));
    assert!(current["user"].is_null());

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
