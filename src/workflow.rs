//! Outcome entry form.
//!
//! `Closed` until the user picks an unresolved record, then `Open` with the
//! choice defaulting to a loss and the gain to zero. Submitting or
//! cancelling closes it again. Only one record is open at a time.

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::money::{Money, MAX_AMOUNT};
use crate::types::{DrawRecord, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultChoice {
    Win,
    #[default]
    Loss,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FormState {
    #[default]
    Closed,
    #[serde(rename_all = "camelCase")]
    Open {
        record_id: RecordId,
        /// Stake of the selected record; this is what a loss costs.
        wager: Money,
        choice: ResultChoice,
        /// Kept while the choice flips back and forth, only used on a win.
        gain: Money,
    },
}

/// Values handed to the ledger on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeSubmission {
    pub record_id: RecordId,
    pub is_win: bool,
    pub amount: Money,
}

#[derive(Debug, Clone, Default)]
pub struct OutcomeForm {
    state: FormState,
}

impl OutcomeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open { .. })
    }

    pub fn selected(&self) -> Option<RecordId> {
        match self.state {
            FormState::Open { record_id, .. } => Some(record_id),
            FormState::Closed => None,
        }
    }

    /// Open the form for `record`, reset to loss / zero gain.
    pub fn open(&mut self, record: &DrawRecord) -> Result<(), WorkflowError> {
        if self.is_open() {
            return Err(WorkflowError::AlreadyOpen);
        }
        if record.is_resolved() {
            return Err(WorkflowError::AlreadyResolved(record.id));
        }
        self.state = FormState::Open {
            record_id: record.id,
            wager: record.wager,
            choice: ResultChoice::default(),
            gain: Money::ZERO,
        };
        Ok(())
    }

    pub fn choose(&mut self, result: ResultChoice) -> Result<(), WorkflowError> {
        match &mut self.state {
            FormState::Open { choice, .. } => {
                *choice = result;
                Ok(())
            }
            FormState::Closed => Err(WorkflowError::NotOpen),
        }
    }

    pub fn set_gain(&mut self, amount: Money) -> Result<(), WorkflowError> {
        if amount.is_negative() {
            return Err(WorkflowError::NegativeGain(amount));
        }
        if amount > MAX_AMOUNT {
            return Err(WorkflowError::GainTooHigh(amount));
        }
        match &mut self.state {
            FormState::Open { gain, .. } => {
                *gain = amount;
                Ok(())
            }
            FormState::Closed => Err(WorkflowError::NotOpen),
        }
    }

    /// The gain input is only shown for a win.
    pub fn shows_gain_input(&self) -> bool {
        matches!(
            self.state,
            FormState::Open {
                choice: ResultChoice::Win,
                ..
            }
        )
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Closed;
    }

    /// Close the form and return what to record.
    pub fn submit(&mut self) -> Result<OutcomeSubmission, WorkflowError> {
        match std::mem::take(&mut self.state) {
            FormState::Open {
                record_id,
                choice,
                gain,
                ..
            } => Ok(OutcomeSubmission {
                record_id,
                is_win: choice == ResultChoice::Win,
                amount: gain,
            }),
            FormState::Closed => Err(WorkflowError::NotOpen),
        }
    }
}
