// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

const UA: &str = concat!("mudra/", env!("CARGO_PKG_VERSION"));

const LAKH: i64 = 100_000;
const CRORE: i64 = 10_000_000;

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = parse_date(s)
        .with_context(|| format!("Invalid timestamp '{}', expected RFC 3339 or YYYY-MM-DD", s))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid boolean '{}'", other)),
    }
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Whole rupees with Indian digit grouping: `₹1,43,563`.
pub fn fmt_inr(d: &Decimal) -> String {
    let rounded = d
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(&rounded.abs().to_string()))
}

/// Crore / lakh abbreviation for large amounts, `fmt_inr` otherwise.
pub fn fmt_inr_compact(d: &Decimal) -> String {
    let crore = Decimal::from(CRORE);
    let lakh = Decimal::from(LAKH);
    if *d >= crore {
        format!("₹{:.2} Cr", d / crore)
    } else if *d >= lakh {
        format!("₹{:.2} L", d / lakh)
    } else {
        fmt_inr(d)
    }
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{}%", d.normalize())
}

// last three digits, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn indian_grouping() {
        assert_eq!(fmt_inr(&dec!(0)), "₹0");
        assert_eq!(fmt_inr(&dec!(999)), "₹999");
        assert_eq!(fmt_inr(&dec!(14356.29)), "₹14,356");
        assert_eq!(fmt_inr(&dec!(100000)), "₹1,00,000");
        assert_eq!(fmt_inr(&dec!(12345678.5)), "₹1,23,45,679");
        assert_eq!(fmt_inr(&dec!(-2500.00)), "-₹2,500");
    }

    #[test]
    fn compact_units() {
        assert_eq!(fmt_inr_compact(&dec!(25000)), "₹25,000");
        assert_eq!(fmt_inr_compact(&dec!(250000)), "₹2.50 L");
        assert_eq!(fmt_inr_compact(&dec!(52000000)), "₹5.20 Cr");
    }

    #[test]
    fn timestamps_accept_dates() {
        let ts = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        let ts = parse_timestamp("2024-03-01T10:30:00.000Z").unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(parse_timestamp("March 1st").is_err());
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(fmt_percent(&dec!(7.50)), "7.5%");
        assert_eq!(fmt_percent(&dec!(9)), "9%");
    }
}
