//! Play one puzzle round in the terminal.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::SystemTime;

use clap::{Parser, ValueEnum};

use tweevoortwaalf::puzzle::paardensprong::Paardensprong;
use tweevoortwaalf::puzzle::taartpuzzel::Taartpuzzel;
use tweevoortwaalf::puzzle::RotationPuzzle;
use tweevoortwaalf::selection::select_hard_puzzle;
use tweevoortwaalf::storage::{PuzzleKind, Storage};
use tweevoortwaalf::woordrader::WoordRader;
use tweevoortwaalf::wordlist::WordList;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Game {
    Paardensprong,
    Taartpuzzel,
    Woordrader,
}

#[derive(Parser, Debug)]
#[command(about = "Play a tweevoortwaalf word puzzle")]
struct Args {
    /// Which puzzle to play
    #[arg(value_enum, default_value = "paardensprong")]
    game: Game,

    /// Draw the answer from stored predictions instead of uniformly
    #[arg(long)]
    hard: bool,

    /// Player name recorded with the game
    #[arg(long)]
    player: Option<String>,

    /// Skip recording the game to the database
    #[arg(long)]
    no_store: bool,

    /// Chance each woordrader letter lies
    #[arg(long, default_value_t = 0.05)]
    p_wrong: f64,

    /// Chance each woordrader letter is unknown
    #[arg(long, default_value_t = 0.05)]
    p_unknown: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = rand::rng();

    let storage = if args.no_store {
        None
    } else {
        Some(Storage::open()?)
    };

    match args.game {
        Game::Paardensprong => {
            let words = WordList::embedded(8)?;
            let mut puzzle = if args.hard {
                let storage = storage
                    .as_ref()
                    .ok_or("hard mode needs the database; drop --no-store")?;
                let option = select_hard_puzzle(storage, PuzzleKind::Paardensprong, &mut rng)?;
                Paardensprong::new(option.answer, option.direction, option.start_offset as usize)?
            } else {
                Paardensprong::generate_unique(words, &mut rng)?
            };

            for row in puzzle.layout() {
                println!("{}", row.map(|c| if c.is_empty() { " ".into() } else { c }).join(" "));
            }
            let game_id = record_start(&storage, PuzzleKind::Paardensprong, &puzzle, None, args.player.as_deref())?;
            let guess = prompt("Your answer: ")?;
            finish(&storage, game_id, puzzle.grade_guess(&guess), &puzzle, &guess)?;
        }
        Game::Taartpuzzel => {
            let words = WordList::embedded(9)?;
            let mut puzzle = if args.hard {
                let storage = storage
                    .as_ref()
                    .ok_or("hard mode needs the database; drop --no-store")?;
                let option = select_hard_puzzle(storage, PuzzleKind::Taartpuzzel, &mut rng)?;
                Taartpuzzel::with_placement(
                    option.answer,
                    option.direction,
                    option.start_offset as usize,
                    &mut rng,
                )?
            } else {
                Taartpuzzel::generate_unique(words, &mut rng)?
            };

            println!("{}", puzzle.layout().join(" "));
            let game_id = record_start(
                &storage,
                PuzzleKind::Taartpuzzel,
                &puzzle,
                Some(puzzle.missing_letter_index() as u32),
                args.player.as_deref(),
            )?;
            let guess = prompt("Your answer: ")?;
            finish(&storage, game_id, puzzle.grade_guess(&guess), &puzzle, &guess)?;
        }
        Game::Woordrader => {
            let words = WordList::embedded(12)?;
            let mut game = WoordRader::random(words, args.p_wrong, args.p_unknown, &mut rng)?;

            let game_id = match &storage {
                Some(storage) => Some(storage.record_game(
                    PuzzleKind::Woordrader,
                    game.answer(),
                    None,
                    None,
                    None,
                    SystemTime::now(),
                    args.player.as_deref(),
                )?),
                None => None,
            };

            loop {
                print_rows(&game);
                let input = prompt("Buy a position (1-12) or enter your guess: ")?;
                if let Ok(position) = input.trim().parse::<usize>() {
                    match game.buy_letter(position.wrapping_sub(1)) {
                        Ok(_) => continue,
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    }
                }
                let correct = game.grade_guess(&input);
                if let (Some(storage), Some(game_id)) = (&storage, game_id) {
                    storage.record_guess(game_id, &input, correct, SystemTime::now())?;
                }
                if correct {
                    println!("You won! The answer was {:?}", game.answer());
                } else {
                    println!("You lost! The answer was {:?}, not {:?}", game.answer(), input.trim());
                }
                break;
            }
        }
    }

    Ok(())
}

fn record_start(
    storage: &Option<Storage>,
    kind: PuzzleKind,
    puzzle: &impl RotationPuzzle,
    missing_letter_index: Option<u32>,
    player: Option<&str>,
) -> Result<Option<i64>, Box<dyn Error>> {
    Ok(match storage {
        Some(storage) => Some(storage.record_game(
            kind,
            puzzle.answer(),
            Some(puzzle.direction()),
            Some(puzzle.start_offset() as u32),
            missing_letter_index,
            SystemTime::now(),
            player,
        )?),
        None => None,
    })
}

fn finish(
    storage: &Option<Storage>,
    game_id: Option<i64>,
    correct: bool,
    puzzle: &impl RotationPuzzle,
    guess: &str,
) -> Result<(), Box<dyn Error>> {
    if let (Some(storage), Some(game_id)) = (storage, game_id) {
        storage.record_guess(game_id, guess, correct, SystemTime::now())?;
    }
    if correct {
        println!("You won! The answer was {:?}", puzzle.answer());
    } else {
        println!("You lost! The answer was {:?}, not {:?}", puzzle.answer(), guess.trim());
    }
    Ok(())
}

fn print_rows(game: &WoordRader) {
    let pad = |cells: Vec<String>| {
        cells
            .iter()
            .map(|c| format!("{c:<2}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    println!("{}", pad(game.top_row()));
    println!(
        "{}",
        (1..=WoordRader::N_LETTERS)
            .map(|i| format!("{i:02}"))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("{}", pad(game.bottom_row()));
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches('\n').to_string())
}
