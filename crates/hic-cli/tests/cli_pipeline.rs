use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hic-post"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// One f15 stream of positive pions at the given (rapidity, pt) pairs, one
/// pion per event.
fn f15(version: &str, energy: &str, pions: &[(f64, f64)]) -> String {
    const MASS: f64 = 0.138;
    let mut out = String::new();
    for &(rapidity, pt) in pions {
        out.push_str(&format!("UQMD   version:   {version}  1000  {version}  output_file  15\n"));
        for k in 2..=4 {
            out.push_str(&format!("header line {k}\n"));
        }
        out.push_str(&format!("cms  energies:  elab=  158.0  sqrt(s)=  {energy}\n"));
        for k in 6..=17 {
            out.push_str(&format!("header line {k}\n"));
        }
        out.push_str("1  0\n");
        out.push_str("    0    0    0    0\n");
        let mt = (MASS * MASS + pt * pt).sqrt();
        out.push_str(&format!(
            "  0.0 0.0 0.0 0.0 {:e} {pt:e} 0.0 {:e} {MASS} 101 0 1 0 0 0\n",
            mt * rapidity.cosh(),
            mt * rapidity.sinh()
        ));
    }
    out
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn extract_combine_format_pipeline() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.f15", &f15("30400", "17.3", &[(0.1, 0.2)]));
    let b = write(dir.path(), "b.f15", &f15("30400", "17.3", &[(0.1, 0.4)]));
    let c = write(dir.path(), "c.f15", &f15("30400", "7.7", &[(0.0, 0.5), (2.0, 0.5)]));

    let part_a = dir.path().join("part_a");
    let part_b = dir.path().join("part_b");
    let low = dir.path().join("low");
    for (output, input) in [(&part_a, &a), (&part_b, &b), (&low, &c)] {
        let out = run(&["extract", arg(output), arg(input)]);
        assert!(out.status.success(), "extract failed: {out:?}");
    }
    assert!(dir.path().join("part_a.json").exists());

    let merged = dir.path().join("merged.json");
    let out = run(&[
        "combine",
        arg(&merged),
        arg(&dir.path().join("part_a.json")),
        arg(&dir.path().join("part_b.json")),
    ]);
    assert!(out.status.success(), "combine failed: {out:?}");

    let tables = dir.path().join("tables");
    let out = run(&[
        "format",
        "SPS",
        arg(&merged),
        arg(&dir.path().join("low.json")),
        "--out-dir",
        arg(&tables),
    ]);
    assert!(out.status.success(), "format failed: {out:?}");

    let mean_pt = fs::read_to_string(tables.join("meanpt_midrapidity_SPS.txt")).unwrap();
    let lines: Vec<&str> = mean_pt.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("!ecm  211  -211"));
    assert!(lines[1].starts_with("7.7  5.00000e-01  "));
    assert!(lines[2].starts_with("17.3  3.00000e-01  "));
    assert_eq!(lines[3], "# UrQMD version 30400");

    let multiplicity =
        fs::read_to_string(tables.join("total_multiplicity_SPS.txt")).unwrap();
    assert!(multiplicity.lines().nth(1).unwrap().starts_with("7.7  1.00000e+00  "));
    assert!(tables.join("midrapidity_yield_SPS.txt").exists());
}

#[test]
fn extract_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "a.f15", &f15("30400", "17.3", &[(0.1, 0.2)]));
    let existing = write(dir.path(), "out.json", "keep me");

    let out = run(&["extract", arg(&existing), arg(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
}

#[test]
fn extract_with_only_disagreeing_files_exits_two() {
    let dir = tempdir().unwrap();
    let empty = write(dir.path(), "first.f15", "");
    let header_only = write(
        dir.path(),
        "header.f15",
        &f15("30400", "17.3", &[(0.1, 0.2)])
            .lines()
            .take(17)
            .map(|line| format!("{line}\n"))
            .collect::<String>(),
    );
    let other = write(dir.path(), "other.f15", &f15("30400", "200", &[(0.1, 0.2)]));
    let output = dir.path().join("out");

    let out = run(&["extract", arg(&output), arg(&empty), arg(&header_only), arg(&other)]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn missing_arguments_exit_one() {
    assert_eq!(run(&["extract", "only-output"]).status.code(), Some(1));
    assert_eq!(run(&["combine", "out", "one.json"]).status.code(), Some(1));
    assert_eq!(run(&["format", "label"]).status.code(), Some(1));
    assert_eq!(run(&[]).status.code(), Some(1));
    assert_eq!(run(&["--help"]).status.code(), Some(0));
}

#[test]
fn combine_skips_other_energies_unless_nothing_is_left() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.f15", &f15("30400", "17.3", &[(0.1, 0.2)]));
    let b = write(dir.path(), "b.f15", &f15("30400", "200", &[(0.1, 0.4)]));
    for (output, input) in [("a", &a), ("b", &b)] {
        let output = dir.path().join(output);
        assert!(run(&["extract", arg(&output), arg(input)]).status.success());
    }
    let merged = dir.path().join("merged.json");
    let out = run(&[
        "combine",
        "--force",
        arg(&merged),
        arg(&dir.path().join("a.json")),
        arg(&dir.path().join("b.json")),
    ]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Skipping"));

    let inspect = run(&["inspect", arg(&merged)]);
    assert!(inspect.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&inspect.stdout).unwrap();
    assert_eq!(summary["events"], 1);
    assert_eq!(summary["collision_energy"], "17.3");
    assert_eq!(summary["species"][0]["key"], "pion_plus");
    assert_eq!(summary["species"][0]["total"], 1);
}
