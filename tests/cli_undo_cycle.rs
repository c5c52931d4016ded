use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use assert_cmd::cargo;

fn write_stash_cfg(path: &Path, root: &Path, move_log: &Path, manifest: &Path) {
    let yaml = format!(
        "destination_root: {}\njoin_char: '@'\nmove_log: {}\nlog_level: quiet\nmanifests:\n  - {}\n",
        root.display(),
        move_log.display(),
        manifest.display()
    );
    fs::write(path, yaml).unwrap();
}

fn write_undo_cfg(path: &Path, root: &Path, move_log: &Path) {
    let yaml = format!(
        "destination_root: {}\njoin_char: '@'\nmove_log: {}\nlog_level: quiet\n",
        root.display(),
        move_log.display()
    );
    fs::write(path, yaml).unwrap();
}

/// Full cycle through the binary: stash two files, then undo. Everything
/// returns to its original path, and the undo log maps stashed names back to
/// those paths.
#[test]
fn undo_restores_what_stash_took() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let root = base.join("target");
    fs::create_dir(&root).unwrap();

    let letter = base.join("mail").join("letter.txt");
    let photo = base.join("pics").join("cat.jpg");
    fs::create_dir_all(letter.parent().unwrap()).unwrap();
    fs::create_dir_all(photo.parent().unwrap()).unwrap();
    fs::write(&letter, b"dear sir").unwrap();
    fs::write(&photo, b"meow").unwrap();

    let manifest = base.join("backup.txt");
    fs::write(
        &manifest,
        format!("{}\n{}\n", letter.display(), photo.display()),
    )
    .unwrap();

    let stash_cfg = base.join("stash.yaml");
    write_stash_cfg(&stash_cfg, &root, &base.join("stash_moves.csv"), &manifest);

    let me = cargo::cargo_bin!("flatstash");
    let out = Command::new(&me)
        .arg(&stash_cfg)
        .arg("--yes")
        .output()
        .expect("spawn stash");
    assert!(out.status.success(), "stash stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!letter.exists() && !photo.exists(), "stash should take both files");

    // Undo gets its own config: same root, fresh log, no manifests needed.
    let undo_cfg = base.join("undo.yaml");
    let undo_log = base.join("undo_moves.csv");
    write_undo_cfg(&undo_cfg, &root, &undo_log);

    let out = Command::new(&me)
        .arg(&undo_cfg)
        .arg("--undo")
        .arg("--yes")
        .output()
        .expect("spawn undo");
    assert!(out.status.success(), "undo stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(fs::read(&letter).expect("letter restored"), b"dear sir");
    assert_eq!(fs::read(&photo).expect("photo restored"), b"meow");
    assert_eq!(
        fs::read_dir(root.join("backup.txt")).unwrap().count(),
        0,
        "group folder is empty after undo"
    );

    let log = fs::read_to_string(&undo_log).expect("read undo log");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3, "header plus one row per restored file: {log}");
    assert_eq!(lines[0], "move_from,move_to");
    for original in [&letter, &photo] {
        assert!(
            lines[1..]
                .iter()
                .any(|l| l.ends_with(&format!(",{}", original.display()))),
            "undo log should map back to {}: {log}",
            original.display()
        );
    }
}
