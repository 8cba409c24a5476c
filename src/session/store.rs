//! Shared keyed store for live puzzles and sessions
//!
//! Every mutable record sits behind its own mutex; map locks are held
//! only long enough to fetch or unlink an entry. Lock order is
//! puzzle -> session on the mutation paths and
//! player index -> session map -> session in the lookup and sweep
//! paths, which keeps the two from deadlocking.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::time::Duration;

use ahash::AHashMap;

use crate::core::error::{GameError, Result};
use crate::core::types::{PlayerId, PuzzleId, SessionId};
use crate::puzzle::state::{Puzzle, PuzzleState};
use crate::session::state::{CompletedSession, Session};

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(rw: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rw.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(rw: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rw.write().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of a session's aggregates, taken under its lock
#[derive(Debug, Clone, Copy)]
pub struct SessionProgress {
    pub attempted: u8,
    pub solved: u8,
    pub total_score: u32,
    pub completed: bool,
}

impl From<&Session> for SessionProgress {
    fn from(session: &Session) -> Self {
        Self {
            attempted: session.puzzles_attempted,
            solved: session.puzzles_solved,
            total_score: session.total_score,
            completed: session.completed,
        }
    }
}

/// Open-session view backing the status operation
#[derive(Debug, Clone, Copy)]
pub struct SessionView {
    pub attempted: u8,
    pub solved: u8,
    pub total_score: u32,
    pub initial_age: u8,
    pub current_age: u8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    pub live_puzzles: usize,
    pub open_sessions: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepStats {
    pub puzzles_removed: usize,
    pub sessions_removed: usize,
}

/// Owns all live puzzles and sessions, keyed by id
pub struct GameStore {
    puzzles: RwLock<AHashMap<PuzzleId, Arc<Mutex<Puzzle>>>>,
    sessions: RwLock<AHashMap<SessionId, Arc<Mutex<Session>>>>,
    /// Player -> session that should absorb their next puzzle
    open_by_player: Mutex<AHashMap<PlayerId, SessionId>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            puzzles: RwLock::new(AHashMap::new()),
            sessions: RwLock::new(AHashMap::new()),
            open_by_player: Mutex::new(AHashMap::new()),
        }
    }

    /// Return the player's open session, or start a fresh one with
    /// `initial_age = age`
    ///
    /// The returned count is the session's attempted puzzles at the time
    /// of the call. Serialized by the player index lock, so two
    /// concurrent requests cannot both create a session.
    pub fn get_or_create_session(
        &self,
        player: &PlayerId,
        age: u8,
        session_length: u8,
    ) -> (SessionId, u8) {
        let mut open = lock(&self.open_by_player);
        if let Some(&existing) = open.get(player) {
            if let Some(entry) = read(&self.sessions).get(&existing).cloned() {
                let session = lock(&entry);
                if session.is_open(session_length) {
                    return (existing, session.puzzles_attempted);
                }
            }
            open.remove(player);
        }

        let session = Session::new(player.clone(), age);
        let id = session.id;
        write(&self.sessions).insert(id, Arc::new(Mutex::new(session)));
        open.insert(player.clone(), id);
        tracing::debug!(player = %player, session = ?id, age, "started session");
        (id, 0)
    }

    pub fn insert_puzzle(&self, puzzle: Puzzle) {
        write(&self.puzzles).insert(puzzle.id, Arc::new(Mutex::new(puzzle)));
    }

    pub fn puzzle(&self, id: PuzzleId) -> Result<Arc<Mutex<Puzzle>>> {
        read(&self.puzzles).get(&id).cloned().ok_or(GameError::PuzzleNotFound(id))
    }

    fn session_entry(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        read(&self.sessions).get(&id).cloned().ok_or(GameError::SessionNotFound(id))
    }

    pub fn session_progress(&self, id: SessionId) -> Result<SessionProgress> {
        let entry = self.session_entry(id)?;
        let session = lock(&entry);
        Ok(SessionProgress::from(&*session))
    }

    /// Flip the puzzle into a terminal state and fold the outcome into
    /// its session, while the caller holds the puzzle lock
    ///
    /// The session lookup happens before the flip, so a missing session
    /// cannot leave the puzzle half-committed.
    pub fn commit_terminal(
        &self,
        puzzle: &mut Puzzle,
        outcome: PuzzleState,
        session_length: u8,
    ) -> Result<(SessionProgress, Option<CompletedSession>)> {
        let entry = self.session_entry(puzzle.session_id)?;
        let solved = matches!(outcome, PuzzleState::Solved { .. });
        let score = outcome.score();
        puzzle.complete(outcome)?;

        let mut session = lock(&entry);
        let record = session.record_outcome(puzzle.age, solved, score, session_length);
        Ok((SessionProgress::from(&*session), record))
    }

    pub fn open_session_view(&self, player: &PlayerId, session_length: u8) -> Option<SessionView> {
        let open = lock(&self.open_by_player);
        let id = *open.get(player)?;
        let entry = read(&self.sessions).get(&id).cloned()?;
        let session = lock(&entry);
        if !session.is_open(session_length) {
            return None;
        }
        Some(SessionView {
            attempted: session.puzzles_attempted,
            solved: session.puzzles_solved,
            total_score: session.total_score,
            initial_age: session.initial_age,
            current_age: session.current_age,
        })
    }

    pub fn stats(&self) -> StoreStats {
        let live_puzzles = read(&self.puzzles).len();
        let open_sessions = read(&self.sessions)
            .values()
            .filter(|entry| !lock(entry).completed)
            .count();
        StoreStats { live_puzzles, open_sessions }
    }

    /// Remove puzzles and sessions idle past `ttl`
    ///
    /// Entity locks are taken before an entry is unlinked, so an
    /// in-flight verification finishes against its (Arc-kept) record
    /// before the id disappears.
    pub fn sweep(&self, ttl: Duration) -> SweepStats {
        let puzzles_removed = {
            let mut puzzles = write(&self.puzzles);
            let before = puzzles.len();
            puzzles.retain(|_, entry| lock(entry).created_at.elapsed() < ttl);
            before - puzzles.len()
        };

        let sessions_removed = {
            let mut open = lock(&self.open_by_player);
            let mut sessions = write(&self.sessions);
            let before = sessions.len();
            sessions.retain(|_, entry| lock(entry).started_at.elapsed() < ttl);
            open.retain(|_, id| sessions.contains_key(id));
            before - sessions.len()
        };

        SweepStats { puzzles_removed, sessions_removed }
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
