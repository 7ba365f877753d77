// MJ-Score CLI Tool
// Command-line interface for scoring a single hand

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use mj_score::{
    tiles, Claim, Hand, HandScorer, HandType, RuleFiles, ScoreSettings, ScoreTables,
    StandardRules, Winds,
};

/// Mahjong Scoring Tool - score a hand with the built-in standard rules
#[derive(Parser, Debug)]
#[command(name = "mj-score")]
#[command(about = "Score a mahjong hand against the standard rule template", long_about = None)]
#[command(version)]
struct Args {
    /// Concealed tiles as comma-separated tile numbers (e.g., "1,1,1,5,5,5,27,27")
    #[arg(value_name = "CONCEALED")]
    concealed: String,

    /// Face-up tiles, grouped per --claims (e.g., "10,11,12")
    #[arg(short, long, default_value = "")]
    open: String,

    /// Claims for the face-up tiles, in order (chow, pung, kong, ckong)
    #[arg(short, long, default_value = "")]
    claims: String,

    /// Bonus tiles set aside during play (flowers 34-37, seasons 38-41)
    #[arg(short, long, default_value = "")]
    bonus: String,

    /// Wind of the round (27=east, 28=south, 29=west, 30=north)
    #[arg(long, default_value = "27")]
    round_wind: usize,

    /// Player's own wind
    #[arg(long, default_value = "27")]
    own_wind: usize,

    /// Score the hand as the round's winning hand
    #[arg(short, long)]
    winner: bool,

    /// Load a rule template from a directory instead of the built-in
    /// standard one (expects config.cfg, winpatterns.txt, limithands.txt,
    /// tilepoints.txt, fullmultipliers.txt, individualmultipliers.txt)
    #[arg(short, long, value_name = "DIR")]
    rules: Option<PathBuf>,

    /// Show the point breakdown ledger
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let hand = Hand {
        concealed: parse_tiles(&args.concealed)?,
        open: parse_tiles(&args.open)?,
        claims: parse_claims(&args.claims)?,
        bonus: parse_tiles(&args.bonus)?,
    };
    let winds = Winds::new(args.round_wind, args.own_wind);
    let hand_type = if args.winner {
        HandType::Winner
    } else {
        HandType::Normal
    };

    let (settings, tables) = match &args.rules {
        Some(dir) => load_rules_dir(dir)?,
        None => StandardRules::load()?,
    };
    if !tables.warnings.is_empty() {
        for warning in &tables.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    let mut scorer = HandScorer::new(tables);
    let breakdown = scorer.score(hand_type, &hand, winds)?;

    println!("Hand:");
    for &tile in &hand.concealed {
        println!("  {}", tiles::name(tile));
    }
    for &tile in &hand.open {
        println!("  {} (open)", tiles::name(tile));
    }
    for &tile in &hand.bonus {
        println!("  {} (bonus)", tiles::name(tile));
    }

    if args.verbose {
        println!();
        for line in scorer.breakdown() {
            println!("{}", line);
        }
    }

    println!();
    println!("Win points:  {}", breakdown.win_points);
    println!("Tile points: {}", breakdown.tile_points);
    println!("Multipliers: {}", breakdown.multipliers);
    println!("Total:       {} (limit {})", breakdown.total, settings.limit);

    Ok(())
}

/// Load a rule template from override files on disk
fn load_rules_dir(
    dir: &Path,
) -> Result<(ScoreSettings, ScoreTables), Box<dyn std::error::Error>> {
    let config = fs::read_to_string(dir.join("config.cfg"))?;
    let win_patterns = fs::read_to_string(dir.join("winpatterns.txt"))?;
    let limit_hands = fs::read_to_string(dir.join("limithands.txt"))?;
    let tile_points = fs::read_to_string(dir.join("tilepoints.txt"))?;
    let full_multipliers = fs::read_to_string(dir.join("fullmultipliers.txt"))?;
    let individual_multipliers = fs::read_to_string(dir.join("individualmultipliers.txt"))?;

    let settings = ScoreSettings::parse(&config)?;
    let files = RuleFiles {
        win_patterns: &win_patterns,
        limit_hands: &limit_hands,
        tile_points: &tile_points,
        full_multipliers: &full_multipliers,
        individual_multipliers: &individual_multipliers,
    };
    Ok((settings, ScoreTables::load(&files, settings.limit)))
}

/// Parse a comma-separated list of tile numbers; an empty string is an
/// empty hand part
fn parse_tiles(text: &str) -> Result<Vec<usize>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a tile number", part))
        })
        .collect()
}

fn parse_claims(text: &str) -> Result<Vec<Claim>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|part| match part.trim() {
            "single" => Ok(Claim::Single),
            "pair" => Ok(Claim::Pair),
            "chow" => Ok(Claim::Chow),
            "pung" => Ok(Claim::Pung),
            "kong" => Ok(Claim::Kong),
            "ckong" => Ok(Claim::ConcealedKong),
            other => Err(format!("'{}' is not a claim", other)),
        })
        .collect()
}
