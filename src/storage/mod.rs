//! Persistent storage using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - Game and guess history per puzzle kind
//! - Puzzle options with predicted win probabilities, consumed by hard mode

use std::path::PathBuf;
use std::time::SystemTime;

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::puzzle::Direction;

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: Initial schema with meta, games, guesses and puzzleoptions tables
const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not determine data directory")]
    NoDataDirectory,
    #[error("failed to create data directory: {0}")]
    CreateDirFailed(std::io::Error),
    #[error("database schema version {found} is newer than supported version {supported}")]
    FutureSchemaVersion { found: u32, supported: u32 },
    #[error("unknown puzzle kind {0:?} in database")]
    UnknownKind(String),
}

/// The three puzzle kinds the database distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleKind {
    Paardensprong,
    Taartpuzzel,
    Woordrader,
}

impl PuzzleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PuzzleKind::Paardensprong => "paardensprong",
            PuzzleKind::Taartpuzzel => "taartpuzzel",
            PuzzleKind::Woordrader => "woordrader",
        }
    }

    fn from_name(name: &str) -> Result<Self, StorageError> {
        match name {
            "paardensprong" => Ok(PuzzleKind::Paardensprong),
            "taartpuzzel" => Ok(PuzzleKind::Taartpuzzel),
            "woordrader" => Ok(PuzzleKind::Woordrader),
            other => Err(StorageError::UnknownKind(other.to_string())),
        }
    }
}

/// One stored game. Direction and start offset are absent for woordrader
/// games, the hidden-letter index only present for taartpuzzel games.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub game_id: i64,
    pub kind: PuzzleKind,
    pub answer: String,
    pub direction: Option<i8>,
    pub start_offset: Option<u32>,
    pub missing_letter_index: Option<u32>,
    pub start_time: i64,
    pub player_name: Option<String>,
}

/// One stored guess.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGuess {
    pub game_id: i64,
    pub guess: String,
    pub correct: bool,
    pub guess_time: i64,
}

/// One hard-mode candidate: a full puzzle placement plus the classifier's
/// predicted success probability and a replay counter.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleOption {
    pub kind: PuzzleKind,
    pub answer: String,
    pub direction: Direction,
    pub start_offset: u32,
    pub probability: Option<f64>,
    pub times_seen: u32,
}

/// The main storage handle.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the storage database in the OS-standard data
    /// directory.
    pub fn open() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;

        let db_path = data_dir.join("tweevoortwaalf.db");
        log::debug!("opening database at {}", db_path.display());
        let conn = Connection::open(&db_path)?;

        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "tweevoortwaalf")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Record a freshly created game and return its id.
    #[allow(clippy::too_many_arguments)]
    pub fn record_game(
        &self,
        kind: PuzzleKind,
        answer: &str,
        direction: Option<Direction>,
        start_offset: Option<u32>,
        missing_letter_index: Option<u32>,
        start_time: SystemTime,
        player_name: Option<&str>,
    ) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO games (kind, answer, direction, start_offset, missing_letter_index, start_time, player_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                kind.as_str(),
                answer,
                direction.map(Direction::as_i8),
                start_offset,
                missing_letter_index,
                to_millis(start_time),
                player_name
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Look a game up by id.
    pub fn game(&self, game_id: i64) -> Result<Option<GameRecord>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT kind, answer, direction, start_offset, missing_letter_index, start_time, player_name
                 FROM games WHERE game_id = ?1",
                params![game_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<i8>>(2)?,
                        row.get::<_, Option<u32>>(3)?,
                        row.get::<_, Option<u32>>(4)?,
                        row.get::<_, i64>(5)?,
                        row.get::<_, Option<String>>(6)?,
                    ))
                },
            )
            .optional()?;

        row.map(
            |(kind, answer, direction, start_offset, missing_letter_index, start_time, player_name)| {
                Ok(GameRecord {
                    game_id,
                    kind: PuzzleKind::from_name(&kind)?,
                    answer,
                    direction,
                    start_offset,
                    missing_letter_index,
                    start_time,
                    player_name,
                })
            },
        )
        .transpose()
    }

    /// Record a submitted guess against a game.
    pub fn record_guess(
        &self,
        game_id: i64,
        guess: &str,
        correct: bool,
        guess_time: SystemTime,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO guesses (game_id, guess, correct, guess_time) VALUES (?1, ?2, ?3, ?4)",
            params![game_id, guess, correct, to_millis(guess_time)],
        )?;
        Ok(())
    }

    /// All guesses for a game, in submission order.
    pub fn guesses(&self, game_id: i64) -> Result<Vec<StoredGuess>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT guess, correct, guess_time FROM guesses WHERE game_id = ?1 ORDER BY guess_id",
        )?;
        let rows = stmt.query_map(params![game_id], |row| {
            Ok(StoredGuess {
                game_id,
                guess: row.get(0)?,
                correct: row.get(1)?,
                guess_time: row.get(2)?,
            })
        })?;

        let mut guesses = Vec::new();
        for row in rows {
            guesses.push(row?);
        }
        Ok(guesses)
    }

    /// Insert or replace a hard-mode candidate.
    pub fn insert_puzzle_option(&self, option: &PuzzleOption) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO puzzleoptions (kind, answer, direction, start_offset, probability, times_seen)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                option.kind.as_str(),
                option.answer,
                option.direction.as_i8(),
                option.start_offset,
                option.probability,
                option.times_seen
            ],
        )?;
        Ok(())
    }

    /// All stored candidates of one kind.
    pub fn puzzle_options(&self, kind: PuzzleKind) -> Result<Vec<PuzzleOption>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT answer, direction, start_offset, probability, times_seen
             FROM puzzleoptions WHERE kind = ?1 ORDER BY answer",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i8>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, u32>(4)?,
            ))
        })?;

        let mut options = Vec::new();
        for row in rows {
            let (answer, direction, start_offset, probability, times_seen) = row?;
            let direction = Direction::try_from(direction)
                .map_err(|_| StorageError::UnknownKind(format!("direction {direction}")))?;
            options.push(PuzzleOption {
                kind,
                answer,
                direction,
                start_offset,
                probability,
                times_seen,
            });
        }
        Ok(options)
    }

    /// Mark a candidate as played: bump its counter and clear the stale
    /// probability so it sits out until the next prediction run.
    pub fn mark_option_used(&self, kind: PuzzleKind, answer: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE puzzleoptions SET times_seen = times_seen + 1, probability = NULL
             WHERE kind = ?1 AND answer = ?2",
            params![kind.as_str(), answer],
        )?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: stores the schema version
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- One row per started game; placement columns are nullable
            -- because the woordrader has no direction or start offset
            CREATE TABLE games (
                game_id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                answer TEXT NOT NULL,
                direction INTEGER,
                start_offset INTEGER,
                missing_letter_index INTEGER,
                start_time INTEGER NOT NULL,
                player_name TEXT
            );

            -- One row per submitted guess
            CREATE TABLE guesses (
                guess_id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL REFERENCES games (game_id),
                guess TEXT NOT NULL,
                correct INTEGER NOT NULL,
                guess_time INTEGER NOT NULL
            );

            CREATE INDEX idx_guesses_game ON guesses (game_id);

            -- Hard-mode candidates with predicted success probabilities
            CREATE TABLE puzzleoptions (
                kind TEXT NOT NULL,
                answer TEXT NOT NULL,
                direction INTEGER NOT NULL,
                start_offset INTEGER NOT NULL,
                probability REAL,
                times_seen INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (kind, answer)
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, to_millis(SystemTime::now())],
        )?;

        Ok(())
    }
}

fn to_millis(time: SystemTime) -> i64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
