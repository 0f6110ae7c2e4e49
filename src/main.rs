// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mudra::config::{Config, SourcePreference};
use mudra::{cli, commands, db, source};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MUDRA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("mudra=warn"));
    // stderr keeps stdout clean for --json output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let matches = cli::build_cli().get_matches();
    let config = Config::from_env()?;
    let preference: SourcePreference = match matches.get_one::<String>("source") {
        Some(s) => s.parse()?,
        None => config.source,
    };
    tracing::debug!(?config, %preference, "configuration loaded");

    let mut conn = db::open(&config.db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("bonds", sub)) => {
            let src = source::open(&config, &conn, preference)?;
            commands::bonds::handle(src.as_ref(), sub)?
        }
        Some(("project", sub)) => commands::project::handle(sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("export", sub)) => {
            let src = source::open(&config, &conn, preference)?;
            commands::exporter::handle(src.as_ref(), sub)?
        }
        Some(("seed", _)) => {
            commands::seed::handle(&mut conn)?;
        }
        Some(("doctor", _)) => {
            let src = source::open(&config, &conn, preference)?;
            commands::doctor::handle(src.as_ref())?
        }
        Some(("portfolio", sub)) => {
            let src = source::open(&config, &conn, preference)?;
            commands::portfolio::handle(&conn, src.as_ref(), sub)?
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
