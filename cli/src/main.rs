use clap::Parser;
use minado_core::{BoardGenerator, Game, GameConfig, RandomBoardGenerator};

mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal minesweeper", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board rows
    #[arg(long, default_value_t = GameConfig::compact().rows)]
    rows: u8,

    /// Board columns
    #[arg(long, default_value_t = GameConfig::compact().cols)]
    cols: u8,

    /// Number of mines
    #[arg(long, default_value_t = GameConfig::compact().mines)]
    mines: u16,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new(args.rows, args.cols, args.mines)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let game = Game::new(RandomBoardGenerator::new(seed).generate(config));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run(game, stdin.lock(), &mut stdout)?;
    Ok(())
}
