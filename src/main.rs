use std::{error::Error, fs::File, io, path::PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use school_proximity::{
    ranked_view,
    table::{load_houses, load_schools, write_ranked, write_scored_houses},
    SchoolTable, ScoringParams,
};

#[derive(Parser)]
#[command(name = "school-proximity", version, about = "Score houses by nearby primary schools")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank schools by weighted registered/vacancy percentage.
    Rank {
        #[arg(long)]
        schools: PathBuf,
        /// Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Append `school_score` and `school_count` to every house.
    Score {
        #[arg(long)]
        schools: PathBuf,
        #[arg(long)]
        houses: PathBuf,
        /// Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_params(config: Option<PathBuf>) -> Result<ScoringParams, Box<dyn Error>> {
    Ok(match config {
        Some(path) => ScoringParams::from_toml_file(path)?,
        None => ScoringParams::default(),
    })
}

fn output(path: Option<PathBuf>) -> Result<Box<dyn io::Write>, Box<dyn Error>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Rank {
            schools,
            output: out,
            config,
        } => {
            let params = load_params(config)?;
            let schools = load_schools(schools)?;
            let ranked = ranked_view(&schools, &params.weights);
            write_ranked(output(out)?, &ranked)?;
            info!("ranked {} schools", ranked.len());
        }
        Command::Score {
            schools,
            houses,
            output: out,
            config,
        } => {
            let params = load_params(config)?;
            let schools = load_schools(schools)?;
            let houses = load_houses(houses)?;

            let table = SchoolTable::new(&schools, params)?;
            let scores = table.score_houses(&houses.positions);
            write_scored_houses(output(out)?, &houses, &scores)?;

            let covered = scores.iter().filter(|s| s.school_count > 0).count();
            info!(
                "scored {} houses, {} with at least one school nearby",
                houses.len(),
                covered
            );
        }
    }

    Ok(())
}
