use clap::Parser;
use wayfind::gametree::{
    alpha_beta_decide, minimax_decide, par_minimax_decide, GameTreeArena, TicTacToe,
};

/// Picks X's move on a tic-tac-toe board.
#[derive(Parser)]
struct Options {
    /// Cells row by row, `.` for empty.
    #[arg(default_value = "O.X/XOO/X..")]
    board: TicTacToe,
    /// Evaluate the root's children on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Options::parse();
    let board = opt.board;
    if !board.x_to_move() {
        anyhow::bail!("it is O's turn on {board}");
    }

    let arena = GameTreeArena::new();
    let t1 = std::time::Instant::now();
    let root = arena.generate(board, true);
    println!(
        "generated {} nodes ({} bytes) in {:.2?}",
        root.size(),
        arena.allocated_bytes(),
        t1.elapsed()
    );

    let minimax = match opt.parallel {
        true => par_minimax_decide(root),
        false => minimax_decide(root),
    };
    let alpha_beta = alpha_beta_decide(root);

    for (name, decision) in [("minimax", minimax), ("alpha-beta", alpha_beta)] {
        match decision {
            Some(d) => {
                let (row, col) = board
                    .move_to(&d.child.state)
                    .unwrap_or_default();
                println!(
                    "{name}: X to ({row}, {col}), value {}, {} nodes visited",
                    d.value, d.visited
                );
            }
            None => println!("{name}: no moves left"),
        }
    }
    Ok(())
}
