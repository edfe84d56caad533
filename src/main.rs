use clap::Parser;
use pipe_core::{Cell, PipeGrid, PuzzleConfig, PuzzleSession, StdRandom};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipe-maze", version, about = "Rotate pipe tiles until every connection matches")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    /// Seed for a reproducible puzzle
    #[arg(long)]
    seed: Option<u64>,
    /// Show the generated grid unscrambled
    #[arg(long)]
    no_scramble: bool,
    /// Print the puzzle and exit
    #[arg(long)]
    print_only: bool,
}

enum Command {
    Rotate(Cell),
    Hint,
    New,
    Quit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut rng = StdRandom::from_optional_seed(config.seed);
    let mut session = PuzzleSession::from_config(&config, &mut rng)?;

    show_puzzle(&session);
    if cli.print_only {
        return Ok(());
    }
    if session.is_solved() {
        println!("Puzzle solved!");
        return Ok(());
    }

    println!("Enter `row col` to rotate a tile, `h` for a hint, `n` for a new puzzle, `q` to quit.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Some(command) => command,
            None => {
                println!("expected `row col`, `h`, `n` or `q`");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Hint => {
                let mismatches = session.mismatches();
                match mismatches.first() {
                    Some(first) => println!("{} problems left, e.g. {}", mismatches.len(), first),
                    None => println!("no problems left"),
                }
            }
            Command::New => match session.regenerate(&config, &mut rng) {
                Ok(()) => show_puzzle(&session),
                Err(e) => println!("{}", e),
            },
            Command::Rotate(cell) => match session.rotate(cell) {
                Ok(outcome) => {
                    print_grid(session.grid());
                    if outcome.newly_solved {
                        println!("Puzzle solved in {} moves!", session.moves());
                        break;
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<PuzzleConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PuzzleConfig::load(path)?,
        None => PuzzleConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_scramble {
        config.scramble = false;
    }
    config.validate()?;
    Ok(config)
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "q" | "quit" => return Some(Command::Quit),
        "h" | "hint" => return Some(Command::Hint),
        "n" | "new" => return Some(Command::New),
        _ => {}
    }
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Rotate(Cell::new(row, col)))
}

/// Grid with row and column labels (last digit only).
fn labelled_grid(grid: &PipeGrid) -> String {
    let header: String = (0..grid.cols()).map(|c| (b'0' + (c % 10) as u8) as char).collect();
    let mut out = format!("   {}\n", header);
    for (row, line) in grid.to_string().lines().enumerate() {
        out.push_str(&format!("{:>2} {}\n", row, line));
    }
    out
}

fn print_grid(grid: &PipeGrid) {
    print!("{}", labelled_grid(grid));
}

fn show_puzzle(session: &PuzzleSession) {
    print_grid(session.grid());
    let gaps = session.gaps();
    if gaps > 0 {
        println!(
            "This grid has {} empty cells and cannot be solved. Enter `n` for a new one.",
            gaps
        );
    }
}
