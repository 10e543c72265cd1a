use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn locscan() -> Command {
    let mut cmd = Command::cargo_bin("locscan").unwrap();
    for var in [
        "LOCSCAN_SOURCE",
        "LOCSCAN_TARGET",
        "LOCSCAN_ENCODING",
        "LOCSCAN_IDENTIFIERS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn extracts_strings_into_target_file() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "Core.lua", br#"f(L["Hello"]) g(AL('World'))"#);
    write(source.path(), "Util.lua", b"return {}");
    write(source.path(), "Locale/enUS.lua", br#"L["Hidden"] = true"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source directory:"))
        .stdout(predicate::str::contains("Identifiers: L, AL, C"))
        .stdout(predicate::str::contains("Encoding: UTF-8"))
        .stdout(predicate::str::contains("Processing: Core.lua"))
        .stdout(predicate::str::contains("Processing: Util.lua"))
        .stdout(predicate::str::contains("enUS.lua").not())
        .stdout(predicate::str::contains("Processed 2 files in"))
        .stdout(predicate::str::contains("Extracted strings saved to:"));

    let written = fs::read_to_string(target.path().join("localization_strings.lua")).unwrap();
    assert_eq!(
        written,
        "--Core.lua\nL[\"Hello\"] = \"Hello\"\nAL[\"World\"] = \"World\"\n\n"
    );
}

#[test]
fn creates_missing_target_directory() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let target_dir = target.path().join("a").join("Dict");

    locscan()
        .arg("--source")
        .arg(source.path())
        .arg("--target")
        .arg(&target_dir)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output = target_dir.join("localization_strings.lua");
    assert!(output.exists());
    assert!(fs::read(output).unwrap().is_empty());
}

#[test]
fn undecodable_file_does_not_stop_the_run() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "Bad.lua", b"L[\"\xff\xfe\"]");
    write(source.path(), "Good.lua", br#"C["Fine"]"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Unable to decode"))
        .stdout(predicate::str::contains("Bad.lua"))
        .stdout(predicate::str::contains("Processed 2 files in"))
        .stdout(predicate::str::contains(
            "WARNING: 1 files could not be decoded as UTF-8",
        ));

    let written = fs::read_to_string(target.path().join("localization_strings.lua")).unwrap();
    assert_eq!(written, "--Good.lua\nC[\"Fine\"] = \"Fine\"\n\n");
}

#[test]
fn extra_excludes_and_identifiers() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "Core.lua", br#"T["Keep"] L["Ignored"]"#);
    write(source.path(), "Tests/Helpers.lua", br#"T["Test only"]"#);
    write(source.path(), "Media/Fonts.lua", br#"T["Font"]"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["-e", "tests", "MEDIA", "-i", "T", "-q"])
        .assert()
        .success();

    let written = fs::read_to_string(target.path().join("localization_strings.lua")).unwrap();
    assert_eq!(written, "--Core.lua\nT[\"Keep\"] = \"Keep\"\n\n");
}

#[test]
fn missing_source_directory_fails() {
    let temp = TempDir::new().unwrap();

    locscan()
        .arg("-s")
        .arg(temp.path().join("nope"))
        .arg("-t")
        .arg(temp.path().join("out"))
        .args(["--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn ascii_encoding_rejects_non_ascii_sources() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "Fr.lua", b"L[\"caf\xe9\"]");
    write(source.path(), "En.lua", br#"L["cafe"]"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["-c", "ascii", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoding: ascii"))
        .stdout(predicate::str::contains("with ascii encoding."));

    let written = fs::read_to_string(target.path().join("localization_strings.lua")).unwrap();
    assert_eq!(written, "--En.lua\nL[\"cafe\"] = \"cafe\"\n\n");
}

#[test]
fn utf16_sources_produce_utf16_output() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let content: Vec<u8> = r#"L["Hi"]"#.encode_utf16().flat_map(u16::to_le_bytes).collect();
    write(source.path(), "Core.lua", &content);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["-c", "utf-16le", "-q"])
        .assert()
        .success();

    let expected: Vec<u8> = "--Core.lua\nL[\"Hi\"] = \"Hi\"\n\n"
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    let written = fs::read(target.path().join("localization_strings.lua")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn unknown_encoding_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();

    locscan()
        .arg("-s")
        .arg(temp.path())
        .args(["-c", "klingon", "--output-format", "plain"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown text encoding"));
}

#[test]
fn json_report() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "Core.lua", br#"L["Hello"]"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(target.path())
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"processing""#))
        .stdout(predicate::str::contains(r#""files_processed": 1"#))
        .stdout(predicate::str::contains(r#""strings_extracted": 1"#));
}

#[test]
fn dry_run_lists_files_without_writing() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let target_dir = target.path().join("Dict");
    write(source.path(), "Core.lua", br#"L["Hello"]"#);
    write(source.path(), "libs/Ace.lua", br#"L["Lib"]"#);

    locscan()
        .arg("-s")
        .arg(source.path())
        .arg("-t")
        .arg(&target_dir)
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would process: Core.lua"))
        .stdout(predicate::str::contains("Ace.lua").not())
        .stdout(predicate::str::contains("1 files would be processed."));

    assert!(!target_dir.exists());
}
