//! Dump difficulty feature rows for every corpus word, for training the
//! win-probability classifier offline.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use tweevoortwaalf::features::FeatureRow;
use tweevoortwaalf::puzzle::taartpuzzel::Taartpuzzel;
use tweevoortwaalf::stats::WordStatistics;
use tweevoortwaalf::wordlist::WordList;

#[derive(Parser, Debug)]
#[command(about = "Export difficulty features as CSV")]
struct Args {
    /// Where to write the CSV; stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let stats = WordStatistics::shared();
    writeln!(
        out,
        "answer,missing_letter_index,direction_logicality,boundary_obviousness,frequency,is_taartpuzzel,max_probable_letter"
    )?;

    // paardensprong rows: one per 8-letter word
    for word in WordList::embedded(8)?.words() {
        let row = FeatureRow::for_answer(stats, word, None, 0);
        write_row(&mut out, &row, None)?;
    }

    // taartpuzzel rows: one per 9-letter word per hidden position
    for word in WordList::embedded(9)?.words() {
        for index in 0..Taartpuzzel::N_LETTERS {
            let row = FeatureRow::for_answer(stats, word, Some(index), 0);
            write_row(&mut out, &row, Some(index))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_row(
    out: &mut dyn Write,
    row: &FeatureRow,
    missing_letter_index: Option<usize>,
) -> io::Result<()> {
    writeln!(
        out,
        "{},{},{},{},{},{},{}",
        row.answer,
        missing_letter_index.map_or(String::new(), |i| i.to_string()),
        row.direction_logicality,
        row.boundary_obviousness,
        row.frequency,
        u8::from(row.is_taartpuzzel),
        row.max_probable_letter
            .map_or(String::new(), |p| p.to_string()),
    )
}
