use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::tempdir;
use assert_cmd::cargo;

fn write_cfg(path: &Path, root: &Path, move_log: &Path, manifests: &[&Path]) {
    let list: String = manifests
        .iter()
        .map(|m| format!("  - {}\n", m.display()))
        .collect();
    let yaml = format!(
        "destination_root: {}\njoin_char: '@'\nmove_log: {}\nlog_level: quiet\nmanifests:\n{}",
        root.display(),
        move_log.display(),
        list
    );
    fs::write(path, yaml).unwrap();
}

#[test]
fn yes_flag_runs_the_batch_without_a_prompt() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("target");
    fs::create_dir(&root).unwrap();

    let file = base.join("report.pdf");
    fs::write(&file, b"%PDF").unwrap();
    let manifest = base.join("papers.txt");
    fs::write(&manifest, format!("{}\n", file.display())).unwrap();

    let cfg_path = base.join("config.yaml");
    let log_path = base.join("moves.csv");
    write_cfg(&cfg_path, &root, &log_path, &[&manifest]);

    let me = cargo::cargo_bin!("flatstash");
    let out = Command::new(me)
        .arg(&cfg_path)
        .arg("--yes")
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!file.exists(), "source should be moved");

    let encoded = flatstash::encode(&file, '@').expect("encode");
    let dest = root.join("papers.txt").join(encoded);
    assert_eq!(fs::read(&dest).expect("read destination"), b"%PDF");

    let log = fs::read_to_string(&log_path).expect("read move log");
    assert_eq!(log.lines().count(), 2, "header plus one row: {log}");
}

#[test]
fn typed_yes_on_stdin_also_proceeds() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("target");
    fs::create_dir(&root).unwrap();

    let file = base.join("note.txt");
    fs::write(&file, b"hi").unwrap();
    let manifest = base.join("notes.txt");
    fs::write(&manifest, format!("{}\n", file.display())).unwrap();

    let cfg_path = base.join("config.yaml");
    write_cfg(&cfg_path, &root, &base.join("moves.csv"), &[&manifest]);

    let me = cargo::cargo_bin!("flatstash");
    let mut child = Command::new(me)
        .arg(&cfg_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child
        .stdin
        .as_mut()
        .expect("stdin handle")
        .write_all(b"yes\n")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait for binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!file.exists(), "source should be moved after typed confirmation");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Plan:"),
        "prompt should show the plan first: {stdout}"
    );
}
