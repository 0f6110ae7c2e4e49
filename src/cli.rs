// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn bonds_cmd() -> Command {
    Command::new("bonds")
        .about("Browse the bond catalog")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("Filter and sort bonds")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Case-insensitive text matched against name and issuer"),
                )
                .arg(
                    Arg::new("risk")
                        .long("risk")
                        .help("Low, Medium or High (anything else means all)"),
                )
                .arg(
                    Arg::new("sector")
                        .long("sector")
                        .help("Case-insensitive substring of the sector; 'all' disables"),
                )
                .arg(
                    Arg::new("min_return")
                        .long("min-return")
                        .allow_hyphen_values(true)
                        .help("Minimum annual return %"),
                )
                .arg(
                    Arg::new("max_return")
                        .long("max-return")
                        .allow_hyphen_values(true)
                        .help("Maximum annual return %"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("returnRate-desc")
                        .help("returnRate-desc|returnRate-asc|price-desc|price-asc|name-asc|name-desc"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_flags()),
        )
        .subcommand(
            Command::new("show")
                .about("Show one bond with its maturity projection")
                .arg(Arg::new("id").required(true))
                .args(json_flags()),
        )
}

fn portfolio_cmd() -> Command {
    Command::new("portfolio")
        .about("Paper-trading holdings")
        .subcommand_required(true)
        .subcommand(
            Command::new("buy")
                .about("Record a simulated purchase")
                .arg(Arg::new("bond").long("bond").required(true))
                .arg(
                    Arg::new("units")
                        .long("units")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
        )
        .subcommand(
            Command::new("list")
                .about("Holdings with projected maturity value")
                .args(json_flags()),
        )
        .subcommand(
            Command::new("allocation")
                .about("Invested value by sector")
                .args(json_flags()),
        )
}

pub fn build_cli() -> Command {
    Command::new("mudra")
        .about("Infrastructure bond discovery, valuation and paper trading")
        .version(clap::crate_version!())
        .arg(
            Arg::new("source")
                .long("source")
                .global(true)
                .help("auto|sqlite|json|http|sample (overrides MUDRA_SOURCE)"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(bonds_cmd())
        .subcommand(
            Command::new("project")
                .about("Compound-growth projection for an investment")
                .allow_negative_numbers(true)
                .arg(Arg::new("price").long("price").required(true))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .help("Annual return %"),
                )
                .arg(
                    Arg::new("years")
                        .long("years")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .args(json_flags()),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("bonds")
                    .about("Validate and store bonds from a JSON or CSV file")
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["json", "csv"])
                            .help("Inferred from the file extension when omitted"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("bonds")
                    .about("Write every bond of the selected source")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("json")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("seed").about("Load the sample bonds into an empty database"))
        .subcommand(Command::new("doctor").about("Report data issues in the bond source"))
        .subcommand(portfolio_cmd())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_source_after_subcommand() {
        let m = build_cli().get_matches_from(["mudra", "bonds", "list", "--source", "sample"]);
        assert_eq!(
            m.get_one::<String>("source").map(String::as_str),
            Some("sample")
        );
    }
}
