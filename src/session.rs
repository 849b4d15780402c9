//! One user session: configuration, in-flight draw, ledger and outcome form.
//!
//! The session owns everything the view reads. State changes happen through
//! explicit calls; the view either polls [`Session::view`] or registers a
//! [`SessionObserver`]. Pacing of the reveal is left to the caller (see
//! `reveal`): [`Session::advance_draw`] says how long to wait before the
//! next step.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::config::{DrawConfig, RevealTiming};
use crate::draw::{DrawEngine, DrawStep};
use crate::error::{SessionError, WorkflowError};
use crate::ledger::Ledger;
use crate::money::Money;
use crate::notify::{CurrencyFormatter, EuroFormatter, Notification, Notifier};
use crate::rng::DrawRng;
use crate::types::{DrawRecord, LedgerStats, RecordId};
use crate::workflow::{FormState, OutcomeForm, ResultChoice};

/// Hooks for views that prefer push over polling. All methods default to no-ops.
pub trait SessionObserver {
    fn on_progress(&self, _numbers: &[u32]) {}
    fn on_draw_finished(&self, _record: &DrawRecord) {}
    fn on_outcome_recorded(&self, _record: &DrawRecord) {}
}

/// Result of one [`Session::advance_draw`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep {
    /// Show `numbers`, then wait `delay` before advancing again.
    Revealed { numbers: Vec<u32>, delay: Duration },
    /// Draw finalized and added to the ledger.
    Finished {
        record: DrawRecord,
        notification: Notification,
    },
}

/// Returned when a submitted outcome reached the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOutcome {
    pub record: DrawRecord,
    pub notification: Notification,
}

/// Everything the view renders, in one serializable snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView<'a> {
    pub config: DrawConfig,
    pub drawing: bool,
    pub current_numbers: &'a [u32],
    pub records: &'a [DrawRecord],
    pub stats: LedgerStats,
    pub form: &'a FormState,
    pub shows_gain_input: bool,
}

pub struct Session {
    config: DrawConfig,
    timing: RevealTiming,
    rng: DrawRng,
    in_flight: Option<DrawEngine>,
    current_numbers: Vec<u32>,
    ledger: Ledger,
    form: OutcomeForm,
    formatter: Box<dyn CurrencyFormatter>,
    notifier: Option<Box<dyn Notifier>>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    /// Fresh session with default config, 1 s reveal and entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(DrawRng::new())
    }

    pub fn with_rng(rng: DrawRng) -> Self {
        Self {
            config: DrawConfig::default(),
            timing: RevealTiming::default(),
            rng,
            in_flight: None,
            current_numbers: Vec::new(),
            ledger: Ledger::new(),
            form: OutcomeForm::new(),
            formatter: Box::new(EuroFormatter),
            notifier: None,
            observers: Vec::new(),
        }
    }

    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn CurrencyFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    // ─── Configuration ──────────────────────────────────────────────────────

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Replace the config. Inputs are locked while a draw runs.
    pub fn set_config(&mut self, config: DrawConfig) -> Result<(), SessionError> {
        if self.is_drawing() {
            return Err(SessionError::DrawInProgress);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ─── Drawing ────────────────────────────────────────────────────────────

    pub fn is_drawing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Numbers on display: partial while drawing, sorted once finished.
    pub fn current_numbers(&self) -> &[u32] {
        &self.current_numbers
    }

    /// Begin a draw with the current config. Refused while one is in flight.
    pub fn start_draw(&mut self) -> Result<(), SessionError> {
        if self.is_drawing() {
            log::warn!("Draw requested while another is in flight");
            return Err(SessionError::DrawInProgress);
        }
        self.config.validate()?;

        self.current_numbers.clear();
        self.in_flight = Some(DrawEngine::from_config(&self.config));
        log::debug!(
            "Draw started: {} from 1..={}",
            self.config.count,
            self.config.max_number
        );
        Ok(())
    }

    /// Reveal the next number, or finalize the draw into the ledger.
    pub fn advance_draw(&mut self) -> Result<SessionStep, SessionError> {
        let engine = self
            .in_flight
            .as_mut()
            .ok_or(SessionError::NoDrawInProgress)?;

        match engine.step(&mut self.rng) {
            DrawStep::Revealed(numbers) => {
                self.current_numbers.clone_from(&numbers);
                for observer in &self.observers {
                    observer.on_progress(&numbers);
                }
                Ok(SessionStep::Revealed {
                    numbers,
                    delay: self.timing.interval,
                })
            }
            DrawStep::Complete(numbers) => {
                let resamples = engine.resamples();
                self.in_flight = None;
                self.current_numbers.clone_from(&numbers);

                let id = RecordId::from_random_bytes(self.rng.id_bytes());
                let record = DrawRecord::new(id, numbers, self.config.wager, Utc::now());
                self.ledger.append(record.clone());
                log::info!(
                    "Draw {} finished: {:?} (wager {}, {} resamples)",
                    record.id,
                    record.numbers,
                    record.wager,
                    resamples
                );

                let notification = Notification::draw_completed(&record.numbers);
                self.publish(&notification);
                for observer in &self.observers {
                    observer.on_draw_finished(&record);
                }
                Ok(SessionStep::Finished {
                    record,
                    notification,
                })
            }
        }
    }

    /// Run a whole draw without waiting between reveals.
    pub fn draw_now(&mut self) -> Result<DrawRecord, SessionError> {
        self.start_draw()?;
        loop {
            if let SessionStep::Finished { record, .. } = self.advance_draw()? {
                return Ok(record);
            }
        }
    }

    // ─── Ledger ─────────────────────────────────────────────────────────────

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn stats(&self) -> LedgerStats {
        self.ledger.aggregate()
    }

    // ─── Outcome form ───────────────────────────────────────────────────────

    pub fn form(&self) -> &OutcomeForm {
        &self.form
    }

    pub fn open_outcome(&mut self, id: &RecordId) -> Result<(), SessionError> {
        let record = self
            .ledger
            .get(id)
            .ok_or(WorkflowError::RecordNotFound(*id))?;
        self.form.open(record)?;
        Ok(())
    }

    pub fn choose_result(&mut self, choice: ResultChoice) -> Result<(), SessionError> {
        Ok(self.form.choose(choice)?)
    }

    pub fn set_gain(&mut self, gain: Money) -> Result<(), SessionError> {
        Ok(self.form.set_gain(gain)?)
    }

    pub fn cancel_outcome(&mut self) {
        self.form.cancel();
    }

    /// Close the form and record its values.
    ///
    /// `None` when the ledger ignored the outcome (record gone or already
    /// resolved).
    pub fn submit_outcome(&mut self) -> Result<Option<RecordedOutcome>, SessionError> {
        let submission = self.form.submit()?;
        if !self
            .ledger
            .attach_outcome(&submission.record_id, submission.is_win, submission.amount)
        {
            return Ok(None);
        }

        let Some(record) = self.ledger.get(&submission.record_id).cloned() else {
            return Ok(None);
        };
        let Some(outcome) = record.outcome else {
            return Ok(None);
        };
        log::info!(
            "Outcome recorded for {}: {} ({})",
            record.id,
            if outcome.is_win { "win" } else { "loss" },
            record.net()
        );

        let notification =
            Notification::outcome_recorded(&outcome, record.wager, self.formatter.as_ref());
        self.publish(&notification);
        for observer in &self.observers {
            observer.on_outcome_recorded(&record);
        }
        Ok(Some(RecordedOutcome {
            record,
            notification,
        }))
    }

    // ─── View ───────────────────────────────────────────────────────────────

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            config: self.config,
            drawing: self.is_drawing(),
            current_numbers: &self.current_numbers,
            records: self.ledger.records(),
            stats: self.ledger.aggregate(),
            form: self.form.state(),
            shows_gain_input: self.form.shows_gain_input(),
        }
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.formatter.format(amount)
    }

    fn publish(&self, notification: &Notification) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(notification);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
