/// Integration test suite: drives the compiled `py-xref` binary against a
/// generated Flask-style project.
///
/// The `CARGO_BIN_EXE_py-xref` environment variable is set by Cargo during
/// `cargo test` to point to the compiled binary for the current profile.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_py-xref"))
}

/// Run a py-xref command and assert it exits successfully.
/// Returns stdout as a String.
fn run_success(args: &[&str]) -> String {
    let out = Command::new(binary())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke py-xref binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        out.status.success(),
        "command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
        args,
        out.status,
        stdout,
        stderr
    );
    stdout
}

/// Run a py-xref command and assert it exits with a non-zero status.
/// Returns (stdout, stderr) as Strings.
fn run_failure(args: &[&str]) -> (String, String) {
    let out = Command::new(binary())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke py-xref binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        !out.status.success(),
        "command {:?} expected to fail but exited successfully\nstdout: {}\nstderr: {}",
        args,
        stdout,
        stderr
    );
    (stdout, stderr)
}

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A small Flask application in the layout of the pycon 2014 tutorial.
fn flask_project() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "manage.py",
        "#!/usr/bin/env python\nimport os\nfrom app import create_app, db\nfrom flask.ext.script import Manager\n",
    );
    write(root, "config.py", "import os\nbasedir = os.path.abspath(os.path.dirname(__file__))\n");
    write(
        root,
        "app/__init__.py",
        "from flask import Flask\nfrom flask.ext.sqlalchemy import SQLAlchemy\n\ndef create_app():\n    from .talks import talks as talks_blueprint\n    from .auth import auth as auth_blueprint\n",
    );
    write(root, "app/models.py", "from werkzeug.security import generate_password_hash, check_password_hash\nfrom . import db\n");
    write(root, "app/talks/__init__.py", "from flask import Blueprint\n\ntalks = Blueprint('talks', __name__)\n\nfrom . import routes\n");
    write(root, "app/talks/routes.py", "from flask import render_template\nfrom . import talks\nfrom ..models import User, Talk\n");
    write(root, "app/auth/__init__.py", "from flask import Blueprint\n\nauth = Blueprint('auth', __name__)\n\nfrom . import routes\n");
    write(root, "app/auth/routes.py", "from flask import render_template\nfrom . import auth\nfrom ..models import User\n");
    write(root, "reqs.pip", "flask\n");
    dir
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

#[test]
fn test_scan_stdout_scoped_json() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let stdout = run_success(&["scan", root, "manage.py", "config.py", "app", "--stdout"]);

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("scan --stdout output is not valid JSON");
    // `app` itself is not a module; only `app.__init__` is.
    assert_eq!(parsed["manage"], serde_json::json!([]));
    assert_eq!(parsed["config"], serde_json::json!([]));
    assert_eq!(parsed["app.__init__"], serde_json::json!([]));
    assert_eq!(
        parsed["app.talks.routes"],
        serde_json::json!(["app.models.User", "app.models.Talk"])
    );
    assert_eq!(parsed["app.auth.routes"], serde_json::json!(["app.models.User"]));
    assert_eq!(parsed["app.talks.__init__"], serde_json::json!([]));
}

#[test]
fn test_scan_stdout_unscoped_json() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let stdout = run_success(&["scan", root, "manage.py", "--stdout", "--unscoped"]);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        parsed["manage"],
        serde_json::json!(["os", "app.create_app", "app.db", "flask.ext.script.Manager"])
    );
}

#[test]
fn test_scan_writes_reports() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let reports = tempfile::tempdir().unwrap();
    let reports_dir = reports.path().to_str().unwrap();

    let stdout = run_success(&[
        "scan", root, "manage.py", "config.py", "app", "-n", "pycon", "-o", reports_dir, "--json",
    ]);

    let summary: serde_json::Value =
        serde_json::from_str(&stdout).expect("scan --json summary is not valid JSON");
    assert_eq!(summary["project"], "pycon");
    assert_eq!(summary["file_count"], 8);
    assert_eq!(summary["reports"].as_array().unwrap().len(), 2);

    let json = fs::read_to_string(reports.path().join("xref_pycon.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["app.models"], serde_json::json!([]));
    assert_eq!(parsed["app.auth.routes"], serde_json::json!(["app.models.User"]));

    let html = fs::read_to_string(reports.path().join("xref_pycon.html")).unwrap();
    assert!(html.contains("<table class=\"hover-grid\">"));
    assert!(html.contains("<th>app.talks</th>"));
    assert!(html.contains("<span title=\"app.models.Talk\">Talk</span>"));
}

#[test]
fn test_scan_human_summary() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let reports = tempfile::tempdir().unwrap();
    let stdout = run_success(&[
        "scan",
        root,
        "app",
        "--format",
        "json",
        "-o",
        reports.path().to_str().unwrap(),
    ]);
    assert!(stdout.contains("6 files"), "stdout: {}", stdout);
    assert!(reports.path().read_dir().unwrap().count() == 1);
}

#[test]
fn test_scan_stdout_rejects_format() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let (stdout, stderr) = run_failure(&["scan", root, "manage.py", "--stdout", "--format", "html"]);
    assert!(stdout.is_empty(), "stdout: {}", stdout);
    assert!(stderr.contains("--format"), "stderr: {}", stderr);
}

#[test]
fn test_scan_reports_dir_from_project_config() {
    let project = flask_project();
    write(project.path(), "py-xref.toml", "reports_dir = \"static\"\n");
    let root = project.path().to_str().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();

    let out = Command::new(binary())
        .args(["scan", root, "manage.py", "--format", "json"])
        .current_dir(elsewhere.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke py-xref binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert!(project.path().join("static").join(format!(
        "xref_{}.json",
        project.path().file_name().unwrap().to_str().unwrap()
    ))
    .exists());
    assert!(!elsewhere.path().join("static").exists());
}

#[test]
fn test_scan_missing_source_fails() {
    let project = flask_project();
    let root = project.path().to_str().unwrap();
    let (_, stderr) = run_failure(&["scan", root, "nope.py", "--stdout"]);
    assert!(
        stderr.contains("module source not found"),
        "stderr should name the missing source\nstderr: {}",
        stderr
    );
}

#[test]
fn test_scan_relative_import_above_top_level_fails() {
    let project = flask_project();
    write(project.path(), "broken.py", "from ..app import db\n");
    let root = project.path().to_str().unwrap();
    let (stdout, stderr) = run_failure(&["scan", root, "broken.py", "--stdout"]);
    assert!(stdout.is_empty(), "no partial report expected\nstdout: {}", stdout);
    assert!(stderr.contains("broken.py"), "stderr: {}", stderr);
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

#[test]
fn test_batch_runs_every_project() {
    let first = flask_project();
    let second = tempfile::tempdir().unwrap();
    write(second.path(), "hello.py", "import os, sys, re\n");

    let work = tempfile::tempdir().unwrap();
    let config_path = work.path().join("batch.toml");
    fs::write(
        &config_path,
        format!(
            "reports_dir = \"static\"\n\n[[projects]]\nname = \"flask\"\nroot = {:?}\nsources = [\"manage.py\", \"app\"]\n\n[[projects]]\nname = \"hello\"\nroot = {:?}\nsources = [\"hello.py\"]\n",
            first.path().to_str().unwrap(),
            second.path().to_str().unwrap(),
        ),
    )
    .unwrap();

    run_success(&["batch", "--config", config_path.to_str().unwrap()]);

    let static_dir = work.path().join("static");
    for file in ["xref_flask.json", "xref_flask.html", "xref_hello.json", "xref_hello.html"] {
        assert!(static_dir.join(file).exists(), "missing {}", file);
    }

    let hello: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(static_dir.join("xref_hello.json")).unwrap())
            .unwrap();
    assert_eq!(hello, serde_json::json!({ "hello": [] }));
}

#[test]
fn test_batch_without_projects_fails() {
    let work = tempfile::tempdir().unwrap();
    let config_path = work.path().join("empty.toml");
    fs::write(&config_path, "exclude = []\n").unwrap();
    let (_, stderr) = run_failure(&["batch", "--config", config_path.to_str().unwrap()]);
    assert!(stderr.contains("no [[projects]]"), "stderr: {}", stderr);
}
