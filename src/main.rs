use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictac_engine::config::{load_config, load_default_config};
use tictac_engine::engine::bot_strategy::RandomStrategy;
use tictac_engine::engine::models::{Mode, Snapshot};
use tictac_engine::engine::session::GameSession;
use tictac_engine::store::{FileStore, MemoryStore, SettingsStore};

#[derive(Parser)]
#[command(name = "tictac", about = "Tic-tac-toe in the terminal, against a friend or a random bot")]
struct Cli {
    /// Path to tictac.toml (default: auto-discover)
    #[arg(long, env = "TICTAC_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file holding win/draw statistics and the theme flag
    #[arg(long, env = "TICTAC_STORE")]
    store: Option<PathBuf>,

    /// Starting mode: "human_vs_human" or "human_vs_bot"
    #[arg(long)]
    mode: Option<Mode>,

    /// Bot RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print snapshots as JSON instead of a text board
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move(usize, usize),
    NewGame,
    SetMode(Mode),
    ResetStats,
    Theme,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["stats", "reset"] => Ok(Command::ResetStats),
        [r, c] => {
            let row = r.parse::<usize>().map_err(|_| format!("bad row '{}'", r))?;
            let col = c.parse::<usize>().map_err(|_| format!("bad column '{}'", c))?;
            Ok(Command::Move(row, col))
        }
        ["new"] | ["restart"] => Ok(Command::NewGame),
        ["bot"] => Ok(Command::SetMode(Mode::HumanVsBot)),
        ["pvp"] => Ok(Command::SetMode(Mode::HumanVsHuman)),
        ["theme"] => Ok(Command::Theme),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        [] => Err(String::new()),
        _ => Err(format!("unknown command '{}', type 'help'", line.trim())),
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "commands: <row> <col> | new | bot | pvp | stats reset | theme | help | quit")
}

fn render(out: &mut impl Write, snap: &Snapshot, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(snap).map_err(io::Error::other)?;
        return writeln!(out, "{}", line);
    }
    for (i, row) in snap.board.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|c| c.map(|m| m.to_string()).unwrap_or_else(|| ".".into()))
            .collect();
        writeln!(out, " {}", cells.join(" | "))?;
        if i + 1 < snap.board.len() {
            writeln!(out, "---+---+---")?;
        }
    }
    writeln!(out, "{}", snap.status)?;
    writeln!(
        out,
        "{}  [{} | {} theme, marks in {}]",
        snap.statistics,
        snap.mode,
        if snap.theme.is_dark() { "dark" } else { "light" },
        snap.theme.mark_color()
    )
}

fn run<S: SettingsStore>(
    mut session: GameSession<S>,
    mode: Mode,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    session.set_mode(mode);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_help(&mut out)?;
    render(&mut out, &session.snapshot(), json)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(msg) => {
                if !msg.is_empty() {
                    writeln!(out, "{}", msg)?;
                }
                continue;
            }
        };
        let events = match command {
            Command::Move(row, col) => session.submit_move(row, col),
            Command::NewGame => session.reset_game(),
            Command::SetMode(m) => session.set_mode(m),
            Command::ResetStats => session.reset_statistics(),
            Command::Theme => session.toggle_theme(),
            Command::Help => {
                print_help(&mut out)?;
                continue;
            }
            Command::Quit => break,
        };
        if events.is_empty() {
            writeln!(out, "(ignored)")?;
        }
        tracing::debug!(?events, "command applied");
        render(&mut out, &session.snapshot(), json)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => load_default_config(),
    };
    if let Some(store) = cli.store {
        config.store_path = Some(store);
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if cli.seed.is_some() {
        config.bot_seed = cli.seed;
    }

    let bot = Box::new(RandomStrategy::with_seed(config.bot_seed));
    match config.store_path {
        Some(ref path) => {
            tracing::info!(path = %path.display(), "using file store");
            run(GameSession::with_bot(FileStore::new(path), bot), config.mode, cli.json)
        }
        None => {
            tracing::info!("no store path configured, statistics kept in memory");
            run(GameSession::with_bot(MemoryStore::new(), bot), config.mode, cli.json)
        }
    }
}
