use clap::{Parser, ValueEnum};
use minefield::game::Difficulty;
use minefield::tui;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Low,
    Medium,
    High,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Low => Difficulty::Low,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::High => Difficulty::High,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Terminal Minesweeper", version)]
struct Args {
    /// Skip the menu and start at this difficulty
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    /// Seed for bomb placement (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = tui::run_tui(args.difficulty.map(Into::into), args.seed) {
        eprintln!("TUI error: {}", e);
        std::process::exit(1);
    }
}
