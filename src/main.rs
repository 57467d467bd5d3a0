use anyhow::Result;
use clap::Parser;
use pegging_solver::{
    choice::format_choices,
    deal::{DEFAULT_PILE_COUNT, Deal},
    solver::{DEFAULT_MAX_STEPS, SolveResult, State, solve},
};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Seed for a reproducible deal (random when omitted)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Number of piles to cut the deck into
    #[arg(short, long, default_value_t = DEFAULT_PILE_COUNT, value_name = "NUM")]
    piles: usize,
    /// Max search steps before settling for the best found
    #[arg(short = 's', long, default_value_t = DEFAULT_MAX_STEPS, value_name = "NUM")]
    max_steps: usize,
    /// Preview the deal without solving
    #[arg(long)]
    preview: bool,
    /// Explicit deal: 52 rank tokens (a 2-10 j q k) in deck order
    #[arg(value_name = "CARD")]
    deck: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let deal = if !cli.deck.is_empty() {
        Deal::parse(&cli.deck, cli.piles)?
    } else {
        let seed = cli.seed.unwrap_or_else(rand::random);
        println!("Seed: {seed}");
        Deal::new_from_seed(seed, cli.piles)?
    };
    println!("{}\n", deal.pretty_print());
    if cli.preview {
        return Ok(());
    }

    let result = do_solve(deal, cli.max_steps);
    print!("{}", format_choices(&result.choices));

    Ok(())
}

fn do_solve(deal: Deal, max_steps: usize) -> SolveResult {
    let spinner = Spinner::start("Solving the deal...");
    let result = solve(State::new(deal.piles), max_steps);
    spinner.finish();

    let score = result.best.score;
    let plays = result.choices.len();
    let complete = result.complete;
    let states = result.states;
    let elapsed = format_elapsed(result.elapsed);
    println!(
        "✓ Best score {score} in {plays} plays — Complete: {complete}, Time: {elapsed}, States: {states}\n"
    );
    result
}

/// Progress indicator on stderr while the search runs; does nothing
/// when stderr is not a terminal.
struct Spinner {
    spinning: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Spinner {
    fn start(message: &'static str) -> Self {
        let spinning = Arc::new(AtomicBool::new(true));
        let handle = if stderr().is_terminal() {
            let flag = Arc::clone(&spinning);
            Some(std::thread::spawn(move || {
                const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
                let stderr = stderr();
                let mut out = stderr.lock();
                let _ = write!(out, "\x1b[?25l"); // hide cursor
                for i in 0.. {
                    if !flag.load(Ordering::Relaxed) {
                        break;
                    }
                    let _ = write!(out, "\r{} {message}", FRAMES[i % FRAMES.len()]);
                    let _ = out.flush();
                    std::thread::sleep(Duration::from_millis(100));
                }
                let _ = write!(out, "\r\x1b[2K\r\x1b[?25h"); // clear line, show cursor
                let _ = out.flush();
            }))
        } else {
            None
        };
        Self { spinning, handle }
    }

    fn finish(mut self) {
        self.spinning.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 90 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{secs}.{:03}s", elapsed.subsec_millis())
    }
}
