use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_cfg(path: &Path, root: &Path, move_log: &Path, manifest: &Path) {
    let yaml = format!(
        "destination_root: {}\njoin_char: '@'\nmove_log: {}\nlog_level: quiet\nmanifests:\n  - {}\n",
        root.display(),
        move_log.display(),
        manifest.display()
    );
    fs::write(path, yaml).unwrap();
}

// Shells normally strip quotes, but users who paste paths into scripts end up
// with literal quote characters in argv. The config argument tolerates them.

#[test]
fn single_quoted_config_path_is_accepted() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_dir = base.join("my configs");
    fs::create_dir_all(&cfg_dir).unwrap();
    let root = base.join("target");
    fs::create_dir(&root).unwrap();

    let file = base.join("notes.md");
    fs::write(&file, b"# notes").unwrap();
    let manifest = base.join("docs.txt");
    fs::write(&manifest, format!("{}\n", file.display())).unwrap();

    let cfg_path = cfg_dir.join("config.yaml");
    let log_path = base.join("moves.csv");
    write_cfg(&cfg_path, &root, &log_path, &manifest);

    let quoted = format!("'{}'", cfg_path.display());

    let me = cargo::cargo_bin!("flatstash");
    let out = Command::new(me)
        .arg(&quoted)
        .arg("--yes")
        .output()
        .expect("spawn binary");

    assert!(
        out.status.success(),
        "expected success; stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(!file.exists(), "source should be moved");
    assert!(log_path.exists(), "move log should be written");
}

#[test]
fn double_quoted_config_path_is_accepted() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("target");
    fs::create_dir(&root).unwrap();

    let file = base.join("photo.jpg");
    fs::write(&file, b"jpg").unwrap();
    let manifest = base.join("pics.txt");
    fs::write(&manifest, format!("{}\n", file.display())).unwrap();

    let cfg_path = base.join("config.yaml");
    let log_path = base.join("moves.csv");
    write_cfg(&cfg_path, &root, &log_path, &manifest);

    let quoted = format!("\"{}\"", cfg_path.display());

    let me = cargo::cargo_bin!("flatstash");
    let out = Command::new(me)
        .arg(&quoted)
        .arg("--dry-run")
        .output()
        .expect("spawn binary");

    assert!(
        out.status.success(),
        "expected success; stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(file.exists(), "dry run must not move anything");
    assert!(!log_path.exists(), "dry run must not write a move log");
}
