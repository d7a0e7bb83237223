use assert_cmd::Command;
use assert_fs::prelude::*;
use std::fs;

fn md2pug() -> Command {
    Command::cargo_bin("md2pug").unwrap()
}

#[test]
fn no_input_selected_exits_with_code_1() {
    md2pug().assert().failure().code(1);
}

#[test]
fn missing_input_file_exits_with_code_2_and_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();

    md2pug()
        .arg("--file")
        .arg(temp.path().join("missing.md"))
        .assert()
        .failure()
        .code(2);

    assert!(!temp.path().join("missing.pug").exists());
}

#[test]
fn binary_input_file_exits_with_code_3() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("blob.md");
    input.write_binary(&[0u8; 128]).unwrap();

    md2pug()
        .arg("--file")
        .arg(input.path())
        .assert()
        .failure()
        .code(3);

    assert!(!temp.path().join("blob.pug").exists());
}

#[test]
fn missing_input_directory_exits_with_code_4() {
    let temp = assert_fs::TempDir::new().unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .code(4);
}

#[test]
fn missing_output_directory_exits_with_code_5() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .arg("--output")
        .arg(temp.path().join("missing-out"))
        .assert()
        .failure()
        .code(5);

    assert!(!temp.path().join("docs/a.pug").exists());
}

#[test]
fn single_file_converts_next_to_the_input() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("notes.md");
    input.write_str("# Title").unwrap();

    md2pug().arg("--file").arg(input.path()).assert().success();

    assert_eq!(
        fs::read_to_string(temp.path().join("notes.pug")).unwrap(),
        "h1 Title\n"
    );
}

#[test]
fn directory_mode_skips_subdirectories_by_default() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();
    temp.child("docs/sub/b.md").write_str("# B").unwrap();
    temp.child("out").create_dir_all().unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .arg("--output")
        .arg(temp.path().join("out"))
        .assert()
        .success();

    assert!(temp.path().join("out/a.pug").exists());
    assert!(!temp.path().join("out/sub/b.pug").exists());
    assert!(temp.path().join("docs/sub/b.md").exists());
}

#[test]
fn recursive_directory_mode_mirrors_the_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();
    temp.child("docs/sub/b.md").write_str("# B").unwrap();
    temp.child("out").create_dir_all().unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .arg("--recursive")
        .arg("--output")
        .arg(temp.path().join("out"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/a.pug")).unwrap(),
        "h1 A\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("out/sub/b.pug")).unwrap(),
        "h1 B\n"
    );
}

#[test]
fn non_markdown_files_are_ignored() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();
    temp.child("docs/notes.txt").write_str("plain").unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .assert()
        .success();

    assert!(temp.path().join("docs/a.pug").exists());
    assert!(!temp.path().join("docs/notes.pug").exists());
}

#[test]
fn rerun_produces_identical_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md")
        .write_str("# A\n\nSome *body* text")
        .unwrap();

    let run = || {
        md2pug()
            .arg("--directory")
            .arg(temp.path().join("docs"))
            .assert()
            .success();
        fs::read(temp.path().join("docs/a.pug")).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn unreadable_file_aborts_the_batch_with_code_1() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md")
        .write_binary(&[0x23, 0x20, 0xff, 0xfe, 0x0a])
        .unwrap();
    temp.child("docs/b.md").write_str("# B").unwrap();

    let assert = md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("a.md"));
    assert!(!temp.path().join("docs/a.pug").exists());
    assert!(!temp.path().join("docs/b.pug").exists());
}

#[test]
fn safe_mode_decline_exits_with_code_6_and_writes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();

    md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .arg("--safe")
        .write_stdin("n\n")
        .assert()
        .failure()
        .code(6);

    assert!(!temp.path().join("docs/a.pug").exists());
}

#[test]
fn safe_mode_accept_converts_and_lists_the_plan() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("docs/a.md").write_str("# A").unwrap();

    let assert = md2pug()
        .arg("--directory")
        .arg(temp.path().join("docs"))
        .arg("--safe")
        .write_stdin("y\n")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("Files to convert:"));
    assert!(stdout.contains("a.md"));
    assert!(temp.path().join("docs/a.pug").exists());
}

#[test]
fn anchor_flag_adds_heading_ids() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("notes.md");
    input.write_str("# My Title").unwrap();

    md2pug()
        .arg("--file")
        .arg(input.path())
        .arg("--anchor")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("notes.pug")).unwrap(),
        "h1(id=\"my-title\") My Title\n"
    );
}

#[test]
fn syntax_highlight_flag_tags_code_blocks() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("snippet.md");
    input.write_str("```rust\nfn main() {}\n```").unwrap();

    md2pug()
        .arg("--file")
        .arg(input.path())
        .arg("--syntax-highlight")
        .assert()
        .success();

    let pug = fs::read_to_string(temp.path().join("snippet.pug")).unwrap();
    assert!(pug.contains("code.hljs.language-rust"));
}

#[test]
fn version_flag_prints_version() {
    let assert = md2pug().arg("-v").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
