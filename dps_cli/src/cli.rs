//! Command-line interface for the dps runner

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Deterministic auto-battler DPS simulator
#[derive(Parser, Debug)]
#[command(name = "dps")]
#[command(about = "Simulate champions hitting a training dummy and report their DPS")]
#[command(version)]
pub struct Args {
    /// Set-descriptor JSON file
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Set to load from the data file
    #[arg(long, default_value = "TFTSet14")]
    pub mutator: String,

    /// Champion as API[:STAR[:ITEM,ITEM..]], repeatable
    #[arg(long = "champion", value_name = "SPEC", required = true)]
    pub champions: Vec<ChampionSpec>,

    /// Simulation config TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override MaxTime in seconds
    #[arg(long)]
    pub max_time: Option<f64>,

    #[arg(long, default_value = "10000")]
    pub dummy_hp: f64,

    #[arg(long, default_value = "0")]
    pub dummy_armor: f64,

    #[arg(long, default_value = "0")]
    pub dummy_mr: f64,

    /// Verbose logging with periodic status lines
    #[arg(long)]
    pub debug: bool,
}

/// One `--champion` argument
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionSpec {
    pub api_name: String,
    pub star_level: u8,
    pub items: Vec<String>,
}

impl FromStr for ChampionSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let api_name = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| format!("missing champion api name in '{s}'"))?
            .to_string();
        let star_level = match parts.next().map(str::trim) {
            None | Some("") => 1,
            Some(star) => match star.parse::<u8>() {
                Ok(level @ 1..=3) => level,
                _ => return Err(format!("star level must be 1, 2 or 3, got '{star}'")),
            },
        };
        let items = parts
            .next()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ChampionSpec {
            api_name,
            star_level,
            items,
        })
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
