// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mudra::source::{BondSource, SqliteSource};
use mudra::{cli, commands::importer, db};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::Builder;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn fixture(suffix: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", body).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["mudra", "import", "bonds"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM bonds", [], |r| r.get(0))
        .unwrap()
}

const CSV_OK: &str = "\
id,name,issuer,sector,description,riskLevel,riskScore,returnRate,price,maturityYears,totalValue,availableUnits,isActive,launchDate
NH-1,National Highway Infrastructure Bond,NHAI,Transportation,Highways,Low,20,7.5,10000,5,50000000000,1200,true,2024-01-15
SC-4, Smart City Development Bond ,Smart City SPV,Urban Development,Smart cities,Medium,,8.8,20000,8,,,false,
";

#[test]
fn imports_csv_with_optional_columns() {
    let mut conn = setup();
    let file = fixture(".csv", CSV_OK);
    run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap();
    assert_eq!(count(&conn), 2);

    let src = SqliteSource::new(&conn);
    let nh = src.fetch_by_id("NH-1").unwrap().unwrap();
    assert_eq!(nh.risk_score, Some(20));
    assert_eq!(nh.total_value, Some(dec!(50000000000)));
    assert_eq!(nh.available_units, Some(dec!(1200)));
    assert!(nh.launch_date.is_some());

    let sc = src.fetch_by_id("SC-4").unwrap().unwrap();
    assert_eq!(sc.name, "Smart City Development Bond");
    assert_eq!(sc.risk_score, None);
    assert!(!sc.is_active);
}

#[test]
fn imports_json_and_trims_path() {
    let mut conn = setup();
    let file = fixture(
        ".json",
        r#"[{"id":"P-5","name":"Port & Logistics Bond","issuer":"Sagarmala SPV",
             "returnRate":9.5,"riskLevel":"High","riskScore":71,"price":50000,
             "maturityYears":12,"description":"Ports","sector":"Maritime"}]"#,
    );
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut conn, &["--path", &padded]).unwrap();

    let bond = SqliteSource::new(&conn).fetch_by_id("P-5").unwrap().unwrap();
    assert_eq!(bond.return_rate, dec!(9.5));
    assert_eq!(bond.maturity_years, 12);
}

#[test]
fn invalid_record_aborts_whole_import() {
    let mut conn = setup();
    let file = fixture(
        ".json",
        r#"[
          {"id":"ok","name":"Fine","issuer":"I","returnRate":5,"riskLevel":"Low",
           "price":100,"maturityYears":3,"description":"d","sector":"Energy"},
          {"id":"bad","name":"Too Good","issuer":"I","returnRate":150,"riskLevel":"Low",
           "price":100,"maturityYears":3,"description":"d","sector":"Energy"}
        ]"#,
    );
    let err = run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("Return rate cannot exceed 100%"));
    assert_eq!(count(&conn), 0);
}

#[test]
fn zero_maturity_is_rejected() {
    let mut conn = setup();
    let body = "\
id,name,issuer,sector,description,riskLevel,returnRate,price,maturityYears
X1,Short,Iss,Energy,desc,Low,5,100,0
";
    let file = fixture(".csv", body);
    let err = run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap_err();
    assert!(format!("{:#}", err).contains("Maturity must be at least 1 year"));
    assert_eq!(count(&conn), 0);
}

#[test]
fn csv_missing_required_column_reports_line() {
    let mut conn = setup();
    let body = "\
id,name,issuer,sector,description,riskLevel,returnRate,price,maturityYears
X1,Named,Iss,Energy,desc,Low,5,100,3
X2,,Iss,Energy,desc,Low,5,100,3
";
    let file = fixture(".csv", body);
    let err = run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("line 3"), "{}", msg);
    assert!(msg.contains("name missing"), "{}", msg);
}

#[test]
fn reimport_updates_instead_of_duplicating() {
    let mut conn = setup();
    let file = fixture(".csv", CSV_OK);
    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, &["--path", &path]).unwrap();
    run_import(&mut conn, &["--path", &path]).unwrap();
    assert_eq!(count(&conn), 2);
}

#[test]
fn unknown_extension_needs_format_flag() {
    let mut conn = setup();
    let file = fixture(".txt", CSV_OK);
    let path = file.path().to_str().unwrap().to_string();
    assert!(run_import(&mut conn, &["--path", &path]).is_err());
    run_import(&mut conn, &["--path", &path, "--format", "csv"]).unwrap();
    assert_eq!(count(&conn), 2);
}
