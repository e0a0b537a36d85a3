// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Generates static movie pages for the CardCraft Movies site.
//!
//! Usage:
//!   OMDB_API_KEY=... MOVIE_NAME="Inception" cardcraft
//!   cardcraft "Dune: Part Two" "Heat"
//!   cardcraft --id tt1375666
//!
//! Settings come from the environment (a `.env` file is honoured); see
//! `cardcraft_core::config` for the full list.
use cardcraft_core::client::Lookup;
use cardcraft_core::config::GeneratorConfig;
use cardcraft_core::pipeline::Generator;
use clap::Parser;
use std::io::Write as _;
use std::process::ExitCode;

/// Generates static movie pages for the CardCraft Movies site.
#[derive(Debug, Parser)]
#[command(
    name = "cardcraft",
    version,
    after_help = "Titles default to $MOVIE_NAME (several separated by ';'). \
                  $OMDB_API_KEY is required."
)]
struct Args {
    /// Movie titles to generate.
    titles: Vec<String>,

    /// Look a movie up by IMDb id instead of by title.
    #[arg(short = 'i', long = "id", value_name = "IMDB_ID")]
    ids: Vec<String>,
}

impl Args {
    /// Titles first, then ids, each in the order given.
    fn lookups(self) -> Vec<Lookup> {
        self.titles
            .into_iter()
            .map(Lookup::Title)
            .chain(self.ids.into_iter().map(Lookup::ImdbId))
            .collect()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(code) => code,
        Err(message) => {
            report(&message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, String> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(format!("Error: could not read .env: {e}"));
    }

    let config = GeneratorConfig::from_env(args.lookups()).map_err(|e| format!("Error: {e}"))?;

    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()
        .map_err(|e| format!("Error setting up logging: {e}"))?;

    let failures = generate_all(&config).await?;
    if failures > 0 {
        log::error!("{failures} of {} movies failed", config.lookups.len());
    }
    Ok(exit_code(failures))
}

/// Attempts every configured movie in turn and returns how many failed.
async fn generate_all(config: &GeneratorConfig) -> Result<usize, String> {
    let generator = Generator::new(config).map_err(|e| format!("Error: {e}"))?;

    let mut failures = 0_usize;
    for lookup in &config.lookups {
        match generator.generate(lookup).await {
            Ok(page) => {
                log::info!(
                    "Movie {} written to {}",
                    page.record.heading(),
                    page.page_path.display()
                );
            }
            Err(e) => {
                failures += 1;
                log::error!("Error generating movie {lookup}: {e}");
                report(&format!("Error: {lookup}: {e}"));
            }
        }
    }

    Ok(failures)
}

fn exit_code(failures: usize) -> ExitCode {
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Writes to stderr without panicking if it is closed.
fn report(message: &str) {
    #[expect(clippy::let_underscore_must_use)]
    let _ = writeln!(std::io::stderr(), "{message}");
}
