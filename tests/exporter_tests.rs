// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mudra::commands::{exporter, importer};
use mudra::source::{BondSource, SampleSource, SqliteSource};
use mudra::{cli, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn export(source: &dyn BondSource, format: &str, out: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["mudra", "export", "bonds", "--format", format, "--out", out]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(source, export_m)
    } else {
        panic!("no export subcommand");
    }
}

fn import(conn: &mut Connection, path: &str) {
    let matches = cli::build_cli().get_matches_from(["mudra", "import", "bonds", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn export_csv_writes_header_and_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bonds.csv");
    export(&SampleSource, "csv", out.to_str().unwrap()).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), exporter::CSV_HEADER.join(","));
    assert_eq!(lines.count(), 5);
    assert!(text.contains("Port & Logistics Bond"));
}

#[test]
fn export_json_is_camel_case_array() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bonds.json");
    export(&SampleSource, "json", out.to_str().unwrap()).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["returnRate"], "7.5");
    assert_eq!(items[0]["maturityYears"], 5);
    assert_eq!(items[0]["riskLevel"], "Low");
    assert!(items[0].get("totalValue").is_none());
}

#[test]
fn unknown_format_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bonds.xml");
    assert!(export(&SampleSource, "xml", out.to_str().unwrap()).is_err());
    assert!(!out.exists());
}

#[test]
fn csv_and_json_exports_reimport_cleanly() {
    let dir = tempdir().unwrap();
    for name in ["bonds.csv", "bonds.json"] {
        let out = dir.path().join(name);
        let path = out.to_str().unwrap();
        export(&SampleSource, &name[6..], path).unwrap();

        let mut conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        import(&mut conn, path);
        import(&mut conn, path);

        let src = SqliteSource::new(&conn);
        assert_eq!(src.count().unwrap(), 5, "{}", name);
        let mut restored = src.fetch_all().unwrap();
        restored.sort_by(|a, b| a.name.cmp(&b.name));
        let mut original = SampleSource.fetch_all().unwrap();
        original.sort_by(|a, b| a.name.cmp(&b.name));
        for (r, o) in restored.iter().zip(&original) {
            assert_eq!(r.native_id, o.native_id);
            assert_eq!(r.return_rate, o.return_rate);
            assert_eq!(r.price, o.price);
            assert_eq!(r.risk_level, o.risk_level);
        }
    }
}
