use chess_corpus_core::decompress::decompress_zstd;
use chess_corpus_core::{
    centipawns_to_win_probability, get_games, win_probability_to_centipawns, Config,
    EvaluationValue, LichessClient, PerfType,
};
use std::env;
use std::num::NonZeroU32;
use std::process;

const DEFAULT_NUM_GAMES: u32 = 100;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 6 {
                eprintln!("Error: fetch needs a player, a rating band and a perf type");
                eprintln!("Usage: {} fetch <player> <from> <to> <perf> [max] [--casual]", args[0]);
                process::exit(1);
            }
            fetch_corpus(&args[2..]).await;
        }
        "decompress" => {
            if args.len() < 4 {
                eprintln!("Error: Please provide an input and an output file");
                eprintln!("Usage: {} decompress <input.pgn.zst> <output.pgn>", args[0]);
                process::exit(1);
            }
            decompress(&args[2], &args[3]);
        }
        "to-cp" => {
            if args.len() < 3 {
                eprintln!("Usage: {} to-cp <probability>", args[0]);
                process::exit(1);
            }
            to_centipawns(&args[2]);
        }
        "to-prob" => {
            if args.len() < 3 {
                eprintln!("Usage: {} to-prob <centipawns>", args[0]);
                process::exit(1);
            }
            to_probability(&args[2]);
        }
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [arguments]", program);
    println!();
    println!("Commands:");
    println!("  fetch <player> <from> <to> <perf> [max] [--casual]");
    println!("                                  Export last month's games with both ratings in [from, to]");
    println!("  decompress <input> <output>     Decompress a .pgn.zst database dump");
    println!("  to-cp <probability>             Convert a win probability to centipawns");
    println!("  to-prob <centipawns>            Convert centipawns to a win probability");
    println!();
    println!("Environment:");
    println!("  LICHESS_API_TOKEN, LICHESS_API_BASE, LICHESS_TIMEOUT_SECS");
    println!();
    println!("Examples:");
    println!("  {} fetch DrNykterstein 2800 3300 blitz 200 > games.ndjson", program);
    println!("  {} to-cp 0.75", program);
}

fn parse_or_exit<T: std::str::FromStr>(raw: &str, what: &str) -> T {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("[ERROR] Invalid {}: {}", what, raw);
            process::exit(1);
        }
    }
}

/// Games requested from the archive; must be at least 1
fn parse_game_count(raw: &str) -> Option<u32> {
    raw.parse::<NonZeroU32>().ok().map(NonZeroU32::get)
}

async fn fetch_corpus(args: &[String]) {
    let player = &args[0];
    let from: u16 = parse_or_exit(&args[1], "rating");
    let to: u16 = parse_or_exit(&args[2], "rating");
    let perf: PerfType = match args[3].parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    };

    let rest = &args[4..];
    let rated = !rest.iter().any(|a| a == "--casual");
    let num_games = rest
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(|raw| match parse_game_count(raw) {
            Some(n) => n,
            None => {
                eprintln!("[ERROR] Invalid game count: {}", raw);
                process::exit(1);
            }
        })
        .unwrap_or(DEFAULT_NUM_GAMES);

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    };
    let client = match LichessClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] Failed to create client: {}", e);
            process::exit(1);
        }
    };

    match get_games(&client, from, to, player, rated, perf, num_games).await {
        Ok(games) => {
            for game in &games {
                tracing::debug!("{}", game.summary());
                match serde_json::to_string(game) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!(id = %game.id, "failed to serialize game: {}", e),
                }
            }
            tracing::info!("wrote {} game(s)", games.len());
        }
        Err(e) => {
            eprintln!("[ERROR] Failed to fetch games: {}", e);
            process::exit(1);
        }
    }
}

fn decompress(input: &str, output: &str) {
    match decompress_zstd(input, output) {
        Ok(bytes) => println!("[OK] Decompression completed: {} bytes written to {}", bytes, output),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    }
}

fn to_centipawns(raw: &str) {
    let w: f64 = parse_or_exit(raw, "probability");
    match win_probability_to_centipawns(w) {
        Ok(cp) => println!("{:.1} ({})", cp, EvaluationValue::Centipawns(cp)),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    }
}

fn to_probability(raw: &str) {
    let cp: f64 = parse_or_exit(raw, "centipawn score");
    let w = centipawns_to_win_probability(cp);
    println!("{:.6} ({})", w, EvaluationValue::WinProbability(w));
}
