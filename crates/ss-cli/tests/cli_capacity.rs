use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stackstat"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("stackstat_cli_{}_{}_{}", name, std::process::id(), nanos));
    std::fs::create_dir_all(&p).unwrap();
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn stdout_json(out: &Output) -> serde_json::Value {
    assert!(out.status.success(), "command failed, stderr={}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

const INVENTORY: &str = "\
#FORMAT=FF10_POINT
#COUNTRY=US
country_cd,facility_id,scc,poll,ann_value,stkhgt,design_capacity,design_capacity_units
US,F1,10100101,PM25-PRI,1.0,20,10,MW
US,F2,10100101,PM25-PRI,1.0,35,30,MW
US,F3,10100101,PM25-PRI,1.0,50,60,MW
US,F4,10100101,PM25-PRI,1.0,80,90,MW
US,F5,10100101,NOX,1.0,99,95,MW
US,F6,30300302,PM25-PRI,1.0,40,120,E6BTU/HR
US,F7,30300302,PM25-PRI,1.0,8,,
US,F8,30300302,PM25-PRI,1.0,150,300,E6BTU/HR
";

const CATALOG: &str = "\
SCC,data category,status,scc level one,scc level two,scc level three,scc level four
10100101,Point,Active,External Combustion,Electric Generation,Anthracite Coal,Pulverized Coal
30300302,Point,Active,Industrial Processes,Primary Metal Production,Iron Production,Sintering
20100101,Point,Retired,Internal Combustion Engines,Electric Generation,Distillate Oil,Turbine
";

/// Inventory, SCC catalog and config under a fresh directory; returns the config path.
fn fixture(root: &Path) -> PathBuf {
    std::fs::create_dir_all(root.join("inputs/ptegu")).unwrap();
    std::fs::write(root.join("inputs/ptegu/ptegu_2022.csv"), INVENTORY).unwrap();
    std::fs::write(root.join("SCCDownload.csv"), CATALOG).unwrap();
    let config = root.join("sources.yaml");
    std::fs::write(
        &config,
        "\
data:
  input_dir: inputs
  scc_dir: .
  scc_filename: SCCDownload.csv
  save_dir: plots
analysis_categories:
  electricity:
    keywords: [electric]
    scc_level: 2
    pollutant: PM25-PRI
  iron-and-steel:
    keywords: [iron, steel]
    scc_level: 3
    pollutant: PM25-PRI
",
    )
    .unwrap();
    config
}

#[test]
fn capacity_writes_table_and_plot_per_category() {
    let root = tmp_dir("capacity");
    let config = fixture(&root);

    let out = run(&["capacity", "--config", config.to_str().unwrap()]);
    let v = stdout_json(&out);

    let cats = v["categories"].as_array().unwrap();
    assert_eq!(cats.len(), 2);

    let elec = cats.iter().find(|c| c["category"] == "electricity").unwrap();
    assert_eq!(elec["status"], "ok");
    assert_eq!(elec["unit"], "MW");
    assert_eq!(elec["scale"], "small");
    assert_eq!(elec["records"], 4);
    assert_eq!(elec["stats"][0]["category"], "All MW");
    assert_eq!(elec["stats"][0]["count"], 4);

    let csv = std::fs::read_to_string(root.join("plots/stack_height_by_capacity_electricity.csv")).unwrap();
    assert!(csv.starts_with("category,count,min,25th_percentile,median,mean,75th_percentile,max,std\n"));
    assert!(csv.contains("\n50-75 MW,1,50.00,50.00,50.00,50.00,50.00,50.00,\n"));
    assert!(root.join("plots/stack_height_by_capacity_electricity.svg").exists());

    // Iron-and-steel rows only carry E6BTU/HR, so the MW filter leaves nothing.
    let steel = cats.iter().find(|c| c["category"] == "iron-and-steel").unwrap();
    assert_eq!(steel["status"], "skipped");
    assert!(steel["reason"].as_str().unwrap().contains("no records"));
    assert!(!root.join("plots/stack_height_by_capacity_iron-and-steel.csv").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn skipped_category_leaves_stdout_parseable() {
    let root = tmp_dir("skip_stdout");
    let config = fixture(&root);

    let out = run(&["capacity", "--config", config.to_str().unwrap(), "--category", "iron-and-steel"]);
    let v = stdout_json(&out);
    assert_eq!(v["categories"][0]["status"], "skipped");

    // The skip warning goes to stderr, never into the summary.
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("category skipped"), "stderr={stderr}");
    assert!(!String::from_utf8_lossy(&out.stdout).contains("WARN"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn capacity_unit_override_and_category_selection() {
    let root = tmp_dir("unit");
    let config = fixture(&root);
    let summary = root.join("summary.json");

    let out = run(&[
        "capacity",
        "--config",
        config.to_str().unwrap(),
        "--category",
        "iron-and-steel",
        "--unit",
        "E6BTU/HR",
        "--output",
        summary.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    let cats = v["categories"].as_array().unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0]["status"], "ok");
    assert_eq!(cats[0]["scale"], "medium");
    assert_eq!(cats[0]["records"], 2);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unknown_category_fails() {
    let root = tmp_dir("unknown");
    let config = fixture(&root);
    let out = run(&["capacity", "--config", config.to_str().unwrap(), "--category", "aluminum"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("aluminum"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn heights_writes_category_table() {
    let root = tmp_dir("heights");
    let config = fixture(&root);

    let out = run(&["heights", "--config", config.to_str().unwrap(), "--category", "iron-and-steel"]);
    let v = stdout_json(&out);
    let cat = &v["categories"][0];
    assert_eq!(cat["status"], "ok");
    assert_eq!(cat["records"], 3);

    let csv = std::fs::read_to_string(root.join("plots/stack_height_analysis_iron-and-steel.csv")).unwrap();
    let labels: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(labels, vec!["All m", "0-10 m", "10-100 m", ">100 m"]);
    assert!(root.join("plots/stack_height_analysis_iron-and-steel.svg").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn units_lists_capacity_units() {
    let root = tmp_dir("units");
    let config = fixture(&root);
    let v = stdout_json(&run(&["units", "--config", config.to_str().unwrap()]));
    assert_eq!(v["rows"], 8);
    assert_eq!(v["units"][0]["unit"], "MW");
    assert_eq!(v["units"][0]["count"], 5);
    assert_eq!(v["units"][1]["unit"], "E6BTU/HR");
    assert_eq!(v["units"][1]["count"], 2);
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn version_prints_crate_version() {
    let out = run(&["version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("stackstat "));
}
