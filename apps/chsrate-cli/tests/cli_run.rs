use std::fs;
use std::path::Path;

use chsrate_cli::{run, Cli};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::Value;

const SOCIETY: &str = r#"{
    "id": "a1",
    "name": "Green Valley CHS",
    "address": "12 Link Road",
    "city": "Pune",
    "totalUnits": 120,
    "yearBuilt": 2004,
    "overallLevel": 3,
    "scores": {
        "structuralSafety": 3, "fireSafety": 3, "waterManagement": 3,
        "electricalSystems": 3, "wasteManagement": 3, "greenBuilding": 3,
        "accessibility": 3, "securitySystems": 3,
        "commonAreaMaintenance": 3, "governance": 3
    },
    "compliance": [
        {"id": "c1", "name": "Fire Safety NOC", "status": "expired", "mandatory": true,
         "category": "Fire Safety"}
    ],
    "leedScore": 60,
    "lastAssessed": "2025-01-15"
}"#;

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn write_society(dir: &Path) -> String {
    let path = dir.join("society.json");
    fs::write(&path, SOCIETY).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn report_writes_named_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let society = write_society(dir.path());
    let out_dir = dir.path().join("out");

    let printed = run_args(&[
        "chsrate",
        "report",
        "--society",
        &society,
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--date",
        "2025-03-05",
    ])
    .unwrap();

    let expected = out_dir.join("Green_Valley_CHS_Report.pdf");
    assert_eq!(printed.trim(), expected.display().to_string());
    assert!(fs::read(&expected).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn certificate_all_mandatory_writes_one_file_per_entry() {
    let dir = tempfile::tempdir().unwrap();
    let society = write_society(dir.path());

    let printed = run_args(&[
        "chsrate",
        "certificate",
        "--society",
        &society,
        "--all-mandatory",
        "--out-dir",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(printed.lines().count(), 14);
    assert!(dir
        .path()
        .join("Fire_Safety_NOC_Green_Valley_CHS.pdf")
        .exists());
    assert!(dir
        .path()
        .join("Lift_Elevator_Safety_Certificate_Green_Valley_CHS.pdf")
        .exists());
}

#[test]
fn report_for_path_like_name_stays_in_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("society.json");
    fs::write(&path, SOCIETY.replace("Green Valley CHS", "../escaped")).unwrap();
    let out_dir = dir.path().join("out");

    let printed = run_args(&[
        "chsrate",
        "report",
        "--society",
        path.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        printed.trim(),
        out_dir.join(".._escaped_Report.pdf").display().to_string()
    );
    assert!(!dir.path().join("escaped_Report.pdf").exists());
}

#[test]
fn compliance_prints_reconciled_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let society = write_society(dir.path());

    let printed = run_args(&["chsrate", "compliance", "--society", &society]).unwrap();
    let view: Value = serde_json::from_str(&printed).unwrap();

    assert_eq!(view["society"], "Green Valley CHS");
    assert_eq!(view["entries"].as_array().unwrap().len(), 20);
    assert_eq!(view["summary"]["expired"], 1);
    assert_eq!(view["summary"]["notRecorded"], 19);
    assert_eq!(view["entries"][4]["status"], "expired");
    assert_eq!(view["entries"][0]["status"], "not_recorded");
}

#[test]
fn stats_filters_by_query() {
    let dir = tempfile::tempdir().unwrap();
    let other = SOCIETY
        .replace("Green Valley CHS", "Harbour Lights")
        .replace("Pune", "Kochi");
    let path = dir.path().join("all.json");
    fs::write(&path, format!("[{SOCIETY}, {other}]")).unwrap();

    let printed = run_args(&[
        "chsrate",
        "stats",
        "--societies",
        path.to_str().unwrap(),
        "--query",
        "KOCHI",
    ])
    .unwrap();
    let view: Value = serde_json::from_str(&printed).unwrap();

    assert_eq!(view["stats"]["total"], 1);
    assert_eq!(view["matches"][0], "Harbour Lights");
    assert_eq!(view["stats"]["averageLeed"], 60);
}

#[test]
fn batch_runs_every_job_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = SOCIETY.replace(r#""overallLevel": 3"#, r#""overallLevel": 9"#);
    let jobs = format!(
        r#"[
            {{"type": "Report", "society": {SOCIETY}}},
            {{"type": "Certificate", "society": {SOCIETY}, "certificate": "Occupancy Certificate"}},
            {{"type": "Report", "society": {corrupt}}}
        ]"#
    );
    let path = dir.path().join("jobs.json");
    fs::write(&path, jobs).unwrap();

    let cli = Cli::try_parse_from([
        "chsrate",
        "batch",
        "--jobs",
        path.to_str().unwrap(),
        "--out-dir",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();
    let result = run(cli, &mut out);

    assert!(result.is_err());
    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["metrics"]["page_count"], 1);
    assert!(dir
        .path()
        .join("Occupancy_Certificate_Green_Valley_CHS.pdf")
        .exists());
}

#[test]
fn missing_input_file_is_an_error() {
    let result = run_args(&["chsrate", "compliance", "--society", "/nonexistent/society.json"]);
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read"));
}
