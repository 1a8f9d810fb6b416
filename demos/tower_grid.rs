use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;
use wayfind::grid::{GridConfig, TileCoord, TowerGrid};

/// Places towers on a tower-defense grid and prints the enemy path after each one.
#[derive(Parser)]
struct Options {
    /// TOML grid configuration. The default 7x16 layout is used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tiles to build towers on, as `row,col`.
    towers: Vec<String>,
}

fn parse_coord(text: &str) -> anyhow::Result<TileCoord> {
    let (row, col) = text
        .split_once(',')
        .with_context(|| format!("expected row,col, got {text:?}"))?;
    Ok(TileCoord::new(row.trim().parse()?, col.trim().parse()?))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Options::parse();

    let config = match &opt.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GridConfig::from_toml_str(&text)?
        }
        None => GridConfig::default(),
    };
    let mut grid = TowerGrid::new(config)?;
    println!("{grid}");

    for text in &opt.towers {
        let coord = parse_coord(text)?;
        if grid.select_tile(coord).is_none() {
            warn!("{coord} cannot be selected");
            continue;
        }
        match grid.build_tower() {
            Ok(_) => println!("tower at {coord}, path is {} tiles", grid.path().len()),
            Err(e) => println!("{e}"),
        }
        println!("{grid}");
    }
    Ok(())
}
