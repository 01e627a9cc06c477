//! In-memory session store shared by the HTTP handlers and the ticker task.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use trivia_core::{
    GameConfig, GameEvent, GamePhase, QuestionBank, RoundController, Shuffler, Side,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{ActionResponse, AnswerResponse, SessionSnapshot, ShareResponse};

/// Events kept per session between polls; the oldest are dropped beyond this.
pub const EVENT_BUFFER_CAPACITY: usize = 1024;

/// A live session and the events its timers produced since the last poll.
pub struct SessionEntry {
    pub controller: RoundController,
    pub created_at: DateTime<Utc>,
    last_seen: Instant,
    buffered: VecDeque<GameEvent>,
    dropped: u64,
}

impl SessionEntry {
    fn new(controller: RoundController) -> Self {
        Self {
            controller,
            created_at: Utc::now(),
            last_seen: Instant::now(),
            buffered: VecDeque::new(),
            dropped: 0,
        }
    }

    fn buffer(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if self.buffered.len() >= EVENT_BUFFER_CAPACITY {
                self.buffered.pop_front();
                self.dropped += 1;
            }
            self.buffered.push_back(event);
        }
    }

    /// Move the controller's pending events behind whatever the ticker buffered
    /// and hand them all out in emission order.
    fn take_events(&mut self) -> Vec<GameEvent> {
        let pending = self.controller.drain_events();
        self.buffer(pending);
        self.buffered.drain(..).collect()
    }

    fn snapshot(&self, id: Uuid) -> SessionSnapshot {
        let controller = &self.controller;
        SessionSnapshot {
            id,
            created_at: self.created_at,
            phase: controller.phase(),
            state: controller.state(),
            lives_left: controller.ledger().lives_left(),
            forgiven: controller.ledger().forgiven(),
            progress: controller.progress_label(),
            timer_remaining: controller.timer_remaining(),
            elapsed_ms: controller.elapsed().as_millis() as u64,
            question: controller.current_question(),
            grid: controller.match_grid(),
        }
    }
}

/// All sessions of the process, keyed by id.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    bank: Arc<QuestionBank>,
    config: GameConfig,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(bank: QuestionBank, config: GameConfig, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            bank: Arc::new(bank),
            config,
            ttl,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        match self.lock() {
            Ok(sessions) => sessions.len(),
            Err(e) => {
                tracing::error!("Cannot count sessions: {}", e);
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".to_string()))
    }

    /// Run `f` against one session, refreshing its idle timer.
    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.lock()?;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Session {}", id)))?;
        entry.last_seen = Instant::now();
        f(entry)
    }

    /// Create an idle session. `shuffle` reorders the bank for this session only.
    pub fn create(&self, seed: Option<u64>, shuffle: bool) -> Result<SessionSnapshot> {
        let mut shuffler = match seed {
            Some(seed) => Shuffler::seeded(seed),
            None => Shuffler::from_entropy(),
        };
        let bank = if shuffle {
            Arc::new(self.bank.shuffled(&mut shuffler))
        } else {
            Arc::clone(&self.bank)
        };

        let controller = RoundController::new(self.config.clone(), bank, shuffler)?;
        let entry = SessionEntry::new(controller);
        let id = Uuid::new_v4();
        let snapshot = entry.snapshot(id);

        self.lock()?.insert(id, entry);
        tracing::info!("Created session {} (seed {:?}, shuffle {})", id, seed, shuffle);
        Ok(snapshot)
    }

    pub fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot> {
        self.with_session(id, |entry| Ok(entry.snapshot(id)))
    }

    pub fn start(&self, id: Uuid) -> Result<ActionResponse> {
        self.with_session(id, |entry| {
            entry.controller.start()?;
            Ok(ActionResponse {
                events: entry.take_events(),
                session: entry.snapshot(id),
            })
        })
    }

    pub fn answer(&self, id: Uuid, option: usize) -> Result<AnswerResponse> {
        self.with_session(id, |entry| {
            let correct = entry.controller.answer(option)?;
            Ok(AnswerResponse {
                correct,
                events: entry.take_events(),
                session: entry.snapshot(id),
            })
        })
    }

    pub fn tap(&self, id: Uuid, side: Side, index: usize) -> Result<ActionResponse> {
        self.with_session(id, |entry| {
            entry.controller.tap(side, index)?;
            Ok(ActionResponse {
                events: entry.take_events(),
                session: entry.snapshot(id),
            })
        })
    }

    /// Take every undelivered event, plus how many were dropped.
    pub fn drain_events(&self, id: Uuid) -> Result<(Vec<GameEvent>, u64)> {
        self.with_session(id, |entry| {
            let events = entry.take_events();
            Ok((events, std::mem::take(&mut entry.dropped)))
        })
    }

    pub fn share(&self, id: Uuid) -> Result<ShareResponse> {
        self.with_session(id, |entry| {
            Ok(ShareResponse {
                text: entry.controller.share_summary(),
                score: entry.controller.ledger().score(),
                outcome: match entry.controller.phase() {
                    GamePhase::GameOver { outcome } => Some(outcome),
                    _ => None,
                },
            })
        })
    }

    pub fn remove(&self, id: Uuid) -> Result<()> {
        match self.lock()?.remove(&id) {
            Some(_) => {
                tracing::info!("Removed session {}", id);
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("Session {}", id))),
        }
    }

    /// Advance every session's timer by `delta` and buffer what they emit.
    pub fn tick_all(&self, delta: Duration) {
        let Ok(mut sessions) = self.lock() else {
            tracing::error!("Skipping tick: session store lock poisoned");
            return;
        };

        for (id, entry) in sessions.iter_mut() {
            if let Err(e) = entry.controller.tick(delta) {
                tracing::warn!("Tick failed for session {}: {}", id, e);
            }
            let events = entry.controller.drain_events();
            entry.buffer(events);
        }
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let Ok(mut sessions) = self.lock() else {
            tracing::error!("Skipping prune: session store lock poisoned");
            return 0;
        };

        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!("Pruned {} idle sessions", removed);
        }
        removed
    }
}
