use clap::Parser;
use log::warn;
use wayfind::gametree::{ConnectFour, Disc};

/// Plays Connect Four against the computer. Red moves are given as column numbers and Yellow
/// answers each one.
#[derive(Parser)]
struct Options {
    /// Columns Red plays, in order, counted from 0.
    #[arg(value_delimiter = ',', default_value = "3,3,4,2")]
    moves: Vec<usize>,
    /// How many moves ahead Yellow searches.
    #[arg(short, long, default_value_t = 6)]
    depth: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Options::parse();
    let mut board = ConnectFour::default();

    for col in opt.moves {
        if !board.try_player_move(col) {
            warn!("red cannot play column {col}");
            continue;
        }
        println!("red plays {col}: {board}");
        let t1 = std::time::Instant::now();
        match board.cpu_move(opt.depth) {
            Some(reply) => println!("yellow plays {reply} in {:.2?}: {board}", t1.elapsed()),
            None => break,
        }
        if board.four_in_a_row().is_some() {
            break;
        }
    }

    match board.four_in_a_row() {
        Some(Disc::Red) => println!("red wins"),
        Some(_) => println!("yellow wins"),
        None if board.is_full() => println!("draw"),
        None => println!("game in progress"),
    }
    Ok(())
}
