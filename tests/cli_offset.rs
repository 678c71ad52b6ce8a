use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_offset() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("vgr")?;
    let output = cmd.arg("offset").arg("tests/annot/indels_1.txt").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "#chrom\tposition\toffset");
    // Rolling sums within chromosome 1: +5, then +5 - 3 = +2.
    assert_eq!(lines[1], "1\t100\t5");
    assert_eq!(lines[2], "1\t200\t2");
    // The accumulator restarts on each chromosome.
    assert_eq!(lines[3], "2\t50\t-10");
    assert_eq!(lines[4], "Y\t10\t2");

    Ok(())
}

#[test]
fn command_offset_stdin() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("vgr")?;
    let output = cmd
        .arg("offset")
        .write_stdin("chr5:1000\tD\t4\nchr5:2000\tI\t1\n")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("chr5\t1000\t-4\n"));
    assert!(stdout.contains("chr5\t2000\t-3\n"));

    Ok(())
}

#[test]
fn command_offset_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("offsets.tsv");

    let mut cmd = Command::cargo_bin("vgr")?;
    cmd.arg("offset")
        .arg("tests/annot/indels_1.txt")
        .arg("-o")
        .arg(&outfile);
    cmd.assert().success();

    let content = fs::read_to_string(&outfile)?;
    assert!(content.starts_with("#chrom\tposition\toffset\n"));
    assert_eq!(content.lines().count(), 5);

    Ok(())
}

#[test]
fn command_offset_malformed() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("vgr")?;
    cmd.arg("offset")
        .write_stdin("chr1\tI\t5\n")
        .assert()
        .failure();

    Ok(())
}
