// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::catalog::project;
use crate::utils::{fmt_inr, fmt_percent, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let price = parse_decimal(sub.get_one::<String>("price").unwrap().trim())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap().trim())?;
    let years = *sub.get_one::<i64>("years").unwrap();

    let p = project(price, rate, years)?;

    let out = json!({
        "price": price,
        "returnRate": rate,
        "years": years,
        "maturityValue": p.maturity_value,
        "totalReturn": p.total_return,
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        let rows = vec![vec![
            fmt_inr(&price),
            fmt_percent(&rate),
            years.to_string(),
            format!("{:.2}", p.maturity_value),
            format!("{:.2}", p.total_return),
            fmt_inr(&p.maturity_value),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Invested", "Rate", "Years", "Maturity Value", "Total Return", "Display"],
                rows,
            )
        );
    }
    Ok(())
}
