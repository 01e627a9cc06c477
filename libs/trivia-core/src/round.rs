//! Session state machine: countdowns, quiz questions, match rounds and game over.
//!
//! ```text
//! Idle -> Countdown -> QuizActive <-> QuizReveal -> RoundComplete -> Countdown ...
//!                   -> MatchActive ----------------> RoundComplete -> GameOver
//! ```
//!
//! Every transition happens synchronously inside `start`, `answer`, `tap` or `tick`.
//! A single timer slot serves countdowns, questions, answer reveals and match rounds;
//! arming it replaces whatever was running. Nothing is rendered here: the controller
//! buffers [`GameEvent`]s for the host to drain.

use std::sync::Arc;
use std::time::Duration;

use crate::bank::QuestionBank;
use crate::config::GameConfig;
use crate::decoy::DecoySelector;
use crate::error::{GameError, Result};
use crate::events::GameEvent;
use crate::ledger::{LedgerVerdict, ScoreLedger};
use crate::match_controller::{MatchController, MatchGridView, TapOutcome};
use crate::puzzle::PuzzleBuilder;
use crate::shuffle::Shuffler;
use crate::timer::{QuestionTimer, TimerSignal};
use crate::types::{
    FailReason, GamePhase, GameState, Outcome, QuestionRecord, QuestionView, RoundMode, Side,
};

/// What the live timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPurpose {
    Countdown,
    Question,
    Reveal,
    MatchRound,
}

pub struct RoundController {
    config: GameConfig,
    bank: Arc<QuestionBank>,
    shuffler: Shuffler,
    puzzle_builder: PuzzleBuilder,
    phase: GamePhase,
    ledger: ScoreLedger,
    round_index: usize,
    position: usize,
    timer: Option<(TimerPurpose, QuestionTimer)>,
    match_round: Option<MatchController>,
    events: Vec<GameEvent>,
    elapsed: Duration,
    last_announced_second: Option<u32>,
}

impl RoundController {
    /// Create an idle session.
    ///
    /// Fails when the configuration is inconsistent or the bank cannot fill every round.
    pub fn new(config: GameConfig, bank: Arc<QuestionBank>, shuffler: Shuffler) -> Result<Self> {
        config.validate()?;
        bank.ensure_capacity(&config)?;

        let puzzle_builder = PuzzleBuilder::new(
            config.match_pairs,
            config.match_decoys,
            config.pair_selection.selector(),
            DecoySelector::new(config.decoy_similarity_threshold),
        );
        let ledger = ScoreLedger::new(config.max_wrong, config.redemption_streak);

        Ok(Self {
            config,
            bank,
            shuffler,
            puzzle_builder,
            phase: GamePhase::Idle,
            ledger,
            round_index: 0,
            position: 0,
            timer: None,
            match_round: None,
            events: Vec::new(),
            elapsed: Duration::ZERO,
            last_announced_second: None,
        })
    }

    /// Leave `Idle` and count down into the first round.
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::Idle => {}
            GamePhase::GameOver { .. } => return Err(GameError::SessionOver),
            _ => return Err(GameError::AlreadyStarted),
        }

        self.ledger = ScoreLedger::new(self.config.max_wrong, self.config.redemption_streak);
        self.elapsed = Duration::ZERO;
        tracing::info!("session started");
        self.emit_score();
        self.enter_countdown(0)
    }

    /// Answer the current quiz question with the option in `slot` (0..4).
    ///
    /// Returns whether the answer was correct.
    pub fn answer(&mut self, slot: usize) -> Result<bool> {
        self.ensure_running()?;
        if self.phase != GamePhase::QuizActive {
            return Err(GameError::NotAcceptingAnswers);
        }

        let record = self.current_record()?;
        let chosen = record
            .option(slot)
            .ok_or(GameError::InvalidOption { slot })?;
        let correct = record.is_correct(chosen);
        let correct_answer = record.correct_answer.trim().to_string();
        let explanation = record.explanation.clone();

        self.stop_timer();
        self.emit(GameEvent::AnswerResolved {
            correct,
            chosen_slot: Some(slot),
            correct_answer: Some(correct_answer),
            explanation,
        });

        let verdict = if correct {
            self.ledger.register_correct()
        } else {
            self.ledger.register_wrong()
        };
        if self.apply_verdict(verdict) {
            return Ok(correct);
        }

        if self.config.answer_reveal().is_zero() {
            self.advance_question()?;
        } else {
            self.phase = GamePhase::QuizReveal;
            self.arm_timer(TimerPurpose::Reveal, self.config.answer_reveal());
        }
        Ok(correct)
    }

    /// Tap a tile of the match grid.
    pub fn tap(&mut self, side: Side, index: usize) -> Result<TapOutcome> {
        self.ensure_running()?;
        if self.phase != GamePhase::MatchActive {
            return Err(GameError::NotInMatchRound);
        }
        let match_round = self
            .match_round
            .as_mut()
            .ok_or(GameError::NotInMatchRound)?;

        let outcome = match_round.tap(side, index, &mut self.ledger);
        match outcome {
            TapOutcome::Ignored => {}
            TapOutcome::Selected { side, index } => {
                self.emit(GameEvent::TileSelected { side, index });
            }
            TapOutcome::Matched {
                pair_id,
                left_index,
                right_index,
                verdict,
                round_complete,
            } => {
                let answer = self
                    .match_round
                    .as_ref()
                    .and_then(|m| m.tiles(Side::Right).get(right_index))
                    .map(|tile| tile.text.clone());
                self.emit(GameEvent::TilesMatched {
                    pair_id,
                    left_index,
                    right_index,
                });
                self.emit(GameEvent::AnswerResolved {
                    correct: true,
                    chosen_slot: None,
                    correct_answer: answer,
                    explanation: None,
                });
                if !self.apply_verdict(verdict) && round_complete {
                    self.round_complete()?;
                }
            }
            TapOutcome::Mismatched {
                left_index,
                right_index,
                verdict,
            } => {
                self.emit(GameEvent::TilesRejected {
                    left_index,
                    right_index,
                    flash_ms: self.config.mismatch_flash_ms,
                });
                self.emit(GameEvent::AnswerResolved {
                    correct: false,
                    chosen_slot: None,
                    correct_answer: None,
                    explanation: None,
                });
                self.apply_verdict(verdict);
            }
        }
        Ok(outcome)
    }

    /// Advance the live timer by `delta`, the time the host measured since its last call.
    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        if matches!(self.phase, GamePhase::Idle | GamePhase::GameOver { .. }) {
            return Ok(());
        }
        self.elapsed = self.elapsed.saturating_add(delta);

        let Some((purpose, timer)) = self.timer.as_mut() else {
            return Ok(());
        };
        let purpose = *purpose;

        match timer.advance(delta) {
            None => Ok(()),
            Some(TimerSignal::Progress {
                remaining,
                seconds_left,
            }) => {
                self.on_progress(purpose, remaining, seconds_left);
                Ok(())
            }
            Some(TimerSignal::Expired) => {
                self.timer = None;
                self.on_expired(purpose)
            }
        }
    }

    fn on_progress(&mut self, purpose: TimerPurpose, remaining: f64, seconds_left: u32) {
        match purpose {
            TimerPurpose::Countdown => {
                if self.last_announced_second != Some(seconds_left) {
                    self.last_announced_second = Some(seconds_left);
                    self.emit(GameEvent::CountdownTick {
                        remaining: seconds_left,
                    });
                }
            }
            TimerPurpose::Question => {
                self.emit(GameEvent::TimerProgress {
                    fraction: remaining,
                });
                if seconds_left <= self.config.final_seconds_warning
                    && self.last_announced_second != Some(seconds_left)
                {
                    self.last_announced_second = Some(seconds_left);
                    self.emit(GameEvent::FinalSeconds { seconds_left });
                }
            }
            TimerPurpose::MatchRound => {
                self.emit(GameEvent::TimerProgress {
                    fraction: remaining,
                });
            }
            TimerPurpose::Reveal => {}
        }
    }

    fn on_expired(&mut self, purpose: TimerPurpose) -> Result<()> {
        match purpose {
            TimerPurpose::Countdown => self.begin_round(self.round_index),
            TimerPurpose::Reveal => self.advance_question(),
            TimerPurpose::Question => {
                self.emit(GameEvent::TimerProgress { fraction: 0.0 });
                self.on_question_timeout()
            }
            TimerPurpose::MatchRound => {
                self.emit(GameEvent::TimerProgress { fraction: 0.0 });
                self.on_match_timeout()
            }
        }
    }

    /// An unanswered question counts as one wrong answer and play moves on.
    fn on_question_timeout(&mut self) -> Result<()> {
        let (correct_answer, explanation) = match self.current_record() {
            Ok(record) => (
                Some(record.correct_answer.trim().to_string()),
                record.explanation.clone(),
            ),
            Err(_) => (None, None),
        };
        tracing::debug!(
            "question {} of round {} timed out",
            self.position,
            self.round_index
        );

        self.emit(GameEvent::AnswerResolved {
            correct: false,
            chosen_slot: None,
            correct_answer,
            explanation,
        });
        let verdict = self.ledger.register_wrong();
        if self.apply_verdict(verdict) {
            return Ok(());
        }
        self.advance_question()
    }

    /// Running out of match time costs one wrong answer and ends the round.
    fn on_match_timeout(&mut self) -> Result<()> {
        let solved = self
            .match_round
            .as_ref()
            .map_or(0, MatchController::solved_count);
        tracing::info!(
            "match round {} timed out with {} pairs solved",
            self.round_index,
            solved
        );

        self.emit(GameEvent::AnswerResolved {
            correct: false,
            chosen_slot: None,
            correct_answer: None,
            explanation: None,
        });
        let verdict = self.ledger.register_wrong();
        if self.apply_verdict(verdict) {
            return Ok(());
        }
        self.round_complete()
    }

    fn enter_countdown(&mut self, round_index: usize) -> Result<()> {
        self.round_index = round_index;
        self.position = 0;

        if self.config.countdown_secs == 0 {
            return self.begin_round(round_index);
        }

        self.phase = GamePhase::Countdown { round_index };
        self.arm_timer(TimerPurpose::Countdown, self.config.countdown_duration());
        self.last_announced_second = Some(self.config.countdown_secs);
        self.emit(GameEvent::CountdownTick {
            remaining: self.config.countdown_secs,
        });
        Ok(())
    }

    /// Slice the round's block and start its quiz or match flow.
    fn begin_round(&mut self, index: usize) -> Result<()> {
        let bank = Arc::clone(&self.bank);
        let block = bank.round_block(index, self.config.round_size)?;

        self.round_index = index;
        self.position = 0;
        self.match_round = None;

        let mode = self.config.mode_for(index);
        tracing::info!("round {} started in {} mode", index + 1, mode);
        self.emit(GameEvent::RoundChanged {
            round_index: index,
            mode,
        });

        match mode {
            RoundMode::Quiz => self.render_question(),
            RoundMode::Match => {
                let puzzle = self.puzzle_builder.build(block, &mut self.shuffler);
                self.emit(GameEvent::MatchGridRendered {
                    left_tiles: puzzle.left_tiles.clone(),
                    right_tiles: puzzle.right_tiles.clone(),
                });
                self.match_round = Some(MatchController::new(puzzle));
                self.phase = GamePhase::MatchActive;
                self.arm_timer(TimerPurpose::MatchRound, self.config.match_duration());
                self.emit(GameEvent::TimerProgress { fraction: 1.0 });
                Ok(())
            }
        }
    }

    fn render_question(&mut self) -> Result<()> {
        let question = QuestionView::from(self.current_record()?);

        self.phase = GamePhase::QuizActive;
        self.emit(GameEvent::QuestionRendered {
            round_index: self.round_index,
            position: self.position,
            question,
        });
        self.arm_timer(TimerPurpose::Question, self.config.question_duration());
        self.emit(GameEvent::TimerProgress { fraction: 1.0 });
        Ok(())
    }

    /// Move to the next quiz question, or finish the round after the last one.
    fn advance_question(&mut self) -> Result<()> {
        self.position += 1;
        if self.position >= self.config.round_size {
            return self.round_complete();
        }
        self.render_question()
    }

    fn round_complete(&mut self) -> Result<()> {
        self.stop_timer();
        self.match_round = None;
        self.phase = GamePhase::RoundComplete {
            round_index: self.round_index,
        };
        tracing::info!(
            "round {} complete, score {}",
            self.round_index + 1,
            self.ledger.score()
        );
        self.emit(GameEvent::RoundCompleted {
            round_index: self.round_index,
        });
        self.complete_round()
    }

    /// Continue with the next round or end the game after the last one.
    fn complete_round(&mut self) -> Result<()> {
        let next = self.round_index + 1;
        if next >= self.config.total_rounds {
            self.end_game(Outcome::Complete);
            return Ok(());
        }
        self.enter_countdown(next)
    }

    fn fail_session(&mut self, reason: FailReason) {
        tracing::info!(
            "session failed ({:?}) in round {} with score {}",
            reason,
            self.round_index + 1,
            self.ledger.score()
        );
        self.end_game(Outcome::Failed);
    }

    fn end_game(&mut self, outcome: Outcome) {
        self.stop_timer();
        self.phase = GamePhase::GameOver { outcome };
        if outcome == Outcome::Complete {
            tracing::info!("session complete with score {}", self.ledger.score());
        }
        self.emit(GameEvent::GameEnded {
            outcome,
            final_score: self.ledger.score(),
        });
    }

    /// Report a ledger change. Returns true when the session has failed.
    fn apply_verdict(&mut self, verdict: LedgerVerdict) -> bool {
        self.emit_score();
        match verdict {
            LedgerVerdict::Counted => false,
            LedgerVerdict::Redeemed => {
                tracing::debug!("mistake forgiven after streak");
                self.emit(GameEvent::MistakeForgiven {
                    wrong_total: self.ledger.wrong_total(),
                });
                false
            }
            LedgerVerdict::SessionFailed => {
                self.fail_session(FailReason::TooManyWrong);
                true
            }
        }
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            score: self.ledger.score(),
            wrong_total: self.ledger.wrong_total(),
        });
    }

    fn emit(&mut self, event: GameEvent) {
        tracing::trace!("event {}", event.kind());
        self.events.push(event);
    }

    fn arm_timer(&mut self, purpose: TimerPurpose, duration: Duration) {
        self.stop_timer();
        self.last_announced_second = None;
        self.timer = Some((purpose, QuestionTimer::start(duration)));
    }

    fn stop_timer(&mut self) {
        if let Some((_, timer)) = self.timer.as_mut() {
            timer.stop();
        }
        self.timer = None;
    }

    fn ensure_running(&self) -> Result<()> {
        match self.phase {
            GamePhase::GameOver { .. } => Err(GameError::SessionOver),
            _ => Ok(()),
        }
    }

    fn current_record(&self) -> Result<&QuestionRecord> {
        let index = self.round_index * self.config.round_size + self.position;
        self.bank
            .get(index)
            .ok_or(GameError::InsufficientQuestions {
                round: self.round_index,
                needed: self.config.round_size,
                available: self.position,
            })
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn state(&self) -> GameState {
        let position_in_round = match &self.match_round {
            Some(m) => m.solved_count(),
            None => self.position,
        };
        GameState {
            score: self.ledger.score(),
            wrong_total: self.ledger.wrong_total(),
            correct_streak_since_wrong: self.ledger.streak(),
            round_index: self.round_index,
            position_in_round,
        }
    }

    /// Question on screen during a quiz round.
    pub fn current_question(&self) -> Option<QuestionView> {
        match self.phase {
            GamePhase::QuizActive | GamePhase::QuizReveal => {
                self.current_record().ok().map(QuestionView::from)
            }
            _ => None,
        }
    }

    pub fn match_grid(&self) -> Option<MatchGridView> {
        self.match_round.as_ref().map(MatchController::view)
    }

    /// Remaining share of the live question or match timer.
    pub fn timer_remaining(&self) -> Option<f64> {
        match &self.timer {
            Some((TimerPurpose::Question | TimerPurpose::MatchRound, timer)) => {
                Some(timer.remaining_fraction())
            }
            _ => None,
        }
    }

    /// Time spent in the session since `start`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Header text such as `Round 1/3 • Q 4/12`.
    pub fn progress_label(&self) -> String {
        let round = format!("Round {}/{}", self.round_index + 1, self.config.total_rounds);
        match self.config.mode_for(self.round_index) {
            RoundMode::Match => {
                let (solved, total) = self
                    .match_round
                    .as_ref()
                    .map_or((0, self.config.match_pairs), |m| {
                        (m.solved_count(), m.pairs().len())
                    });
                format!("{round} • {solved}/{total} pairs")
            }
            RoundMode::Quiz => {
                format!("{round} • Q {}/{}", self.position + 1, self.config.round_size)
            }
        }
    }

    /// One-line result suitable for sharing.
    pub fn share_summary(&self) -> String {
        format!(
            "Brain ⚡ Bolt | Score {} | Round {}/{}",
            self.ledger.score(),
            self.round_index + 1,
            self.config.total_rounds
        )
    }
}
