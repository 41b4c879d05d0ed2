//! SQLite-backed leaderboard store.
//!
//! Implements the engine's [`HandRecorder`] boundary so games feed results
//! straight into the database. Multiple tables may write concurrently, so
//! every statement runs under a busy timeout with a bounded retry on
//! `SQLITE_BUSY`.

use pokermind_engine::record::{FinalChips, GameRegistration, HandRecorder, RecordError, SeatOutcome};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(60);
const BUSY_RETRIES: u32 = 3;

/// Aggregated standing of one participant across all recorded games.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub games_played: u64,
    pub hands_played: u64,
    pub net_profit: i64,
    pub hands_won: u64,
    pub win_rate: f64,
    pub bb_per_100: f64,
}

pub struct LeaderboardStore {
    conn: Mutex<Connection>,
}

impl LeaderboardStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS models (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 name TEXT UNIQUE NOT NULL
             );
             CREATE TABLE IF NOT EXISTS games (
                 id TEXT PRIMARY KEY,
                 start_time TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                 end_time TIMESTAMP,
                 starting_chips INTEGER NOT NULL,
                 small_blind INTEGER NOT NULL,
                 big_blind INTEGER NOT NULL,
                 num_hands INTEGER NOT NULL,
                 status TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS game_participants (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 game_id TEXT NOT NULL,
                 model_id INTEGER NOT NULL,
                 final_chips INTEGER,
                 FOREIGN KEY (game_id) REFERENCES games (id),
                 FOREIGN KEY (model_id) REFERENCES models (id)
             );
             CREATE TABLE IF NOT EXISTS hand_results (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 game_id TEXT NOT NULL,
                 hand_number INTEGER NOT NULL,
                 model_id INTEGER NOT NULL,
                 profit_loss INTEGER NOT NULL,
                 won_hand BOOLEAN NOT NULL,
                 starting_chips INTEGER NOT NULL,
                 ending_chips INTEGER NOT NULL,
                 big_blind INTEGER NOT NULL,
                 FOREIGN KEY (game_id) REFERENCES games (id),
                 FOREIGN KEY (model_id) REFERENCES models (id)
             );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `op` with the connection, retrying a bounded number of times when
    /// another writer holds the database.
    fn with_retry<T>(
        &self,
        op: impl Fn(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, rusqlite::Error> {
        let conn = self.conn.lock().map_err(|_| {
            rusqlite::Error::InvalidQuery // lock poisoned; surfaced as a query failure
        })?;
        let mut last_err = None;
        for attempt in 0..=BUSY_RETRIES {
            match op(&conn) {
                Ok(value) => return Ok(value),
                Err(err) if is_busy(&err) && attempt < BUSY_RETRIES => {
                    tracing::warn!(attempt, "database busy, retrying");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or(rusqlite::Error::InvalidQuery))
    }

    fn model_id(conn: &Connection, name: &str) -> Result<i64, rusqlite::Error> {
        conn.execute(
            "INSERT OR IGNORE INTO models (name) VALUES (?1)",
            params![name],
        )?;
        conn.query_row(
            "SELECT id FROM models WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
    }

    /// Current standings ordered by net profit.
    pub fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardRow>, rusqlite::Error> {
        self.with_retry(|conn| {
            let mut stmt = conn.prepare(
                "SELECT
                     m.name,
                     COUNT(DISTINCT hr.game_id),
                     COUNT(hr.id),
                     SUM(hr.profit_loss),
                     SUM(CASE WHEN hr.won_hand = 1 THEN 1 ELSE 0 END),
                     ROUND(SUM(CASE WHEN hr.won_hand = 1 THEN 1 ELSE 0 END) * 100.0
                         / COUNT(hr.id), 2),
                     ROUND(SUM(hr.profit_loss) * 100.0 / SUM(hr.big_blind)
                         / COUNT(hr.id), 2)
                 FROM models m
                 JOIN hand_results hr ON m.id = hr.model_id
                 GROUP BY m.id
                 ORDER BY SUM(hr.profit_loss) DESC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(LeaderboardRow {
                    name: row.get(0)?,
                    games_played: row.get(1)?,
                    hands_played: row.get(2)?,
                    net_profit: row.get(3)?,
                    hands_won: row.get(4)?,
                    win_rate: row.get(5)?,
                    bb_per_100: row.get(6)?,
                })
            })?;
            rows.collect()
        })
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked
    )
}

impl HandRecorder for LeaderboardStore {
    fn register_game(&self, registration: &GameRegistration) -> Result<(), RecordError> {
        self.with_retry(|conn| {
            conn.execute(
                "INSERT INTO games
                     (id, starting_chips, small_blind, big_blind, num_hands, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'in_progress')",
                params![
                    registration.game_id,
                    registration.starting_stack,
                    registration.small_blind,
                    registration.big_blind,
                    registration.num_hands,
                ],
            )?;
            for name in &registration.participants {
                let model_id = Self::model_id(conn, name)?;
                conn.execute(
                    "INSERT INTO game_participants (game_id, model_id) VALUES (?1, ?2)",
                    params![registration.game_id, model_id],
                )?;
            }
            Ok(())
        })
        .map_err(|e| RecordError::Storage(e.to_string()))
    }

    fn record_hand(
        &self,
        game_id: &str,
        hand_number: u64,
        big_blind: u32,
        outcomes: &[SeatOutcome],
    ) -> Result<(), RecordError> {
        self.with_retry(|conn| {
            for outcome in outcomes {
                let model_id = Self::model_id(conn, &outcome.name)?;
                conn.execute(
                    "INSERT INTO hand_results
                         (game_id, hand_number, model_id, profit_loss, won_hand,
                          starting_chips, ending_chips, big_blind)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        game_id,
                        hand_number,
                        model_id,
                        outcome.profit_loss,
                        outcome.won,
                        outcome.chips_before,
                        outcome.chips_after,
                        big_blind,
                    ],
                )?;
            }
            Ok(())
        })
        .map_err(|e| RecordError::Storage(e.to_string()))
    }

    fn complete_game(&self, game_id: &str, final_chips: &[FinalChips]) -> Result<(), RecordError> {
        self.with_retry(|conn| {
            conn.execute(
                "UPDATE games SET status = 'completed', end_time = CURRENT_TIMESTAMP
                 WHERE id = ?1",
                params![game_id],
            )?;
            for entry in final_chips {
                let model_id = Self::model_id(conn, &entry.name)?;
                conn.execute(
                    "UPDATE game_participants SET final_chips = ?1
                     WHERE game_id = ?2 AND model_id = ?3",
                    params![entry.chips, game_id, model_id],
                )?;
            }
            Ok(())
        })
        .map_err(|e| RecordError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> GameRegistration {
        GameRegistration {
            game_id: "g1".into(),
            starting_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            num_hands: 10,
            participants: vec!["alpha".into(), "beta".into()],
        }
    }

    fn outcome(name: &str, before: u32, after: u32, won: bool) -> SeatOutcome {
        SeatOutcome {
            name: name.into(),
            chips_before: before,
            chips_after: after,
            profit_loss: i64::from(after) - i64::from(before),
            won,
        }
    }

    #[test]
    fn full_game_round_trip() {
        let store = LeaderboardStore::open_in_memory().expect("store");
        store.register_game(&registration()).expect("register");
        store
            .record_hand(
                "g1",
                1,
                10,
                &[
                    outcome("alpha", 1000, 1015, true),
                    outcome("beta", 1000, 985, false),
                ],
            )
            .expect("hand 1");
        store
            .record_hand(
                "g1",
                2,
                10,
                &[
                    outcome("alpha", 1015, 1010, false),
                    outcome("beta", 985, 990, true),
                ],
            )
            .expect("hand 2");
        store
            .complete_game(
                "g1",
                &[
                    FinalChips {
                        name: "alpha".into(),
                        chips: 1010,
                    },
                    FinalChips {
                        name: "beta".into(),
                        chips: 990,
                    },
                ],
            )
            .expect("complete");

        let rows = store.leaderboard(10).expect("leaderboard");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "alpha");
        assert_eq!(rows[0].net_profit, 10);
        assert_eq!(rows[0].hands_played, 2);
        assert_eq!(rows[0].hands_won, 1);
        assert_eq!(rows[0].win_rate, 50.0);
        assert_eq!(rows[1].name, "beta");
        assert_eq!(rows[1].net_profit, -10);
    }

    #[test]
    fn duplicate_names_share_one_model_row() {
        let store = LeaderboardStore::open_in_memory().expect("store");
        let conn = store.conn.lock().expect("conn");
        let a = LeaderboardStore::model_id(&conn, "same").expect("first");
        let b = LeaderboardStore::model_id(&conn, "same").expect("second");
        assert_eq!(a, b);
    }
}
