//! Operator input accumulation and the bounded retry loop.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vatbook_shared::config::InputConfig;

use crate::ledger::LedgerError;
use crate::rates::{RateTable, VatRate};
use crate::vat::VatCalculator;

/// A field asked of the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Free-text details.
    Details,
    /// Gross total including VAT.
    GrossTotal,
    /// VAT rate.
    Rate,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Details => f.write_str("details"),
            Self::GrossTotal => f.write_str("gross total"),
            Self::Rate => f.write_str("VAT rate"),
        }
    }
}

/// Validated input for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Free-text details.
    pub details: String,
    /// Gross total including VAT, at most 2 decimal places.
    pub gross_total: Decimal,
    /// Rate with a column in the ledger schema.
    pub rate: VatRate,
}

impl TransactionDraft {
    /// Creates a draft from already-typed values.
    #[must_use]
    pub fn new(details: impl Into<String>, gross_total: Decimal, rate: VatRate) -> Self {
        Self {
            details: details.into(),
            gross_total,
            rate,
        }
    }
}

/// Caller-owned accumulator of the fields accepted so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInput {
    details: Option<String>,
    gross_total: Option<Decimal>,
    rate: Option<VatRate>,
}

impl TransactionInput {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first field still missing, in prompt order.
    #[must_use]
    pub fn next_field(&self) -> Option<InputField> {
        if self.details.is_none() {
            Some(InputField::Details)
        } else if self.gross_total.is_none() {
            Some(InputField::GrossTotal)
        } else if self.rate.is_none() {
            Some(InputField::Rate)
        } else {
            None
        }
    }

    /// Validates `raw` for `field` and stores it.
    ///
    /// A rejected value leaves the accumulator unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` or `InvalidRate` for values worth asking
    /// again, and `UnsupportedRateForSchema` for a rate with no column.
    pub fn accept(&mut self, field: InputField, raw: &str) -> Result<(), LedgerError> {
        match field {
            InputField::Details => self.details = Some(raw.trim().to_string()),
            InputField::GrossTotal => self.gross_total = Some(VatCalculator::parse_gross(raw)?),
            InputField::Rate => {
                let rate = VatRate::parse(raw)?;
                if RateTable::column_for(rate).is_none() {
                    return Err(LedgerError::UnsupportedRateForSchema(rate));
                }
                self.rate = Some(rate);
            }
        }
        Ok(())
    }

    /// Returns the draft once every field is accepted.
    #[must_use]
    pub fn draft(&self) -> Option<TransactionDraft> {
        match (&self.details, self.gross_total, self.rate) {
            (Some(details), Some(gross_total), Some(rate)) => Some(TransactionDraft {
                details: details.clone(),
                gross_total,
                rate,
            }),
            _ => None,
        }
    }
}

/// Source of operator answers, implemented by the menu layer.
pub trait TransactionPrompt {
    /// Asks for `field`. `previous_error` is set when the last answer for
    /// the same field was rejected. Returns `None` to cancel.
    fn ask(&mut self, field: InputField, previous_error: Option<&LedgerError>) -> Option<String>;
}

/// Prompt answering from a fixed script, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<InputField>,
    rejections: Vec<&'static str>,
}

impl ScriptedPrompt {
    /// Creates a prompt returning `answers` in order, then cancelling.
    #[must_use]
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fields asked so far, in order.
    #[must_use]
    pub fn asked(&self) -> &[InputField] {
        &self.asked
    }

    /// Error codes shown to the operator before re-asking.
    #[must_use]
    pub fn rejections(&self) -> &[&'static str] {
        &self.rejections
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl TransactionPrompt for ScriptedPrompt {
    fn ask(&mut self, field: InputField, previous_error: Option<&LedgerError>) -> Option<String> {
        self.asked.push(field);
        if let Some(e) = previous_error {
            self.rejections.push(e.error_code());
        }
        self.answers.pop_front()
    }
}

/// How many times a field may be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Asks until the answer is valid or the operator cancels.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Gives up after `attempts` rejected answers for one field.
    #[must_use]
    pub const fn bounded(attempts: u32) -> Self {
        Self {
            max_attempts: Some(attempts),
        }
    }

    /// Reads the policy from configuration. Zero means unbounded.
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        match config.max_attempts {
            0 => Self::unbounded(),
            n => Self::bounded(n),
        }
    }

    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Collects a transaction from scratch.
///
/// # Errors
///
/// See [`complete_transaction`].
pub fn collect_transaction<P: TransactionPrompt + ?Sized>(
    prompt: &mut P,
    policy: RetryPolicy,
) -> Result<TransactionDraft, LedgerError> {
    complete_transaction(prompt, TransactionInput::new(), policy)
}

/// Asks for every field `input` is still missing.
///
/// Fields already accepted are never asked again. A rejected answer is
/// re-asked with the rejection attached.
///
/// # Errors
///
/// Returns `InputCancelled` when the prompt returns nothing,
/// `RetryLimitExceeded` when a field runs out of attempts, and
/// `UnsupportedRateForSchema` for a rate with no ledger column.
pub fn complete_transaction<P: TransactionPrompt + ?Sized>(
    prompt: &mut P,
    mut input: TransactionInput,
    policy: RetryPolicy,
) -> Result<TransactionDraft, LedgerError> {
    while let Some(field) = input.next_field() {
        let mut attempts = 0;
        let mut rejection: Option<LedgerError> = None;

        loop {
            if policy.exhausted(attempts) {
                return Err(LedgerError::RetryLimitExceeded {
                    field: field.to_string(),
                    attempts,
                });
            }

            let raw = prompt
                .ask(field, rejection.as_ref())
                .ok_or(LedgerError::InputCancelled)?;
            attempts += 1;

            match input.accept(field, &raw) {
                Ok(()) => break,
                Err(e) if e.is_input_error() => {
                    debug!(field = %field, attempts, error = %e, "Rejected input");
                    rejection = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    input.draft().ok_or(LedgerError::InputCancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_collects_valid_answers() {
        let mut prompt = ScriptedPrompt::new(["Consulting", "123.00", "23"]);
        let draft = collect_transaction(&mut prompt, RetryPolicy::unbounded()).unwrap();

        assert_eq!(draft, TransactionDraft::new("Consulting", dec!(123.00), VatRate::Standard));
        assert_eq!(
            prompt.asked(),
            [InputField::Details, InputField::GrossTotal, InputField::Rate]
        );
    }

    #[test]
    fn test_rejected_field_is_asked_again_alone() {
        let mut prompt =
            ScriptedPrompt::new(["Lunch", "abc", "-5", "40.50", "7", "13.5%"]);
        let draft = collect_transaction(&mut prompt, RetryPolicy::unbounded()).unwrap();

        assert_eq!(draft.gross_total, dec!(40.50));
        assert_eq!(draft.rate, VatRate::Reduced);
        assert_eq!(
            prompt.asked(),
            [
                InputField::Details,
                InputField::GrossTotal,
                InputField::GrossTotal,
                InputField::GrossTotal,
                InputField::Rate,
                InputField::Rate,
            ]
        );
        assert_eq!(
            prompt.rejections(),
            ["INVALID_AMOUNT", "INVALID_AMOUNT", "INVALID_RATE"]
        );
    }

    #[test]
    fn test_accepted_fields_survive_in_caller_input() {
        let mut input = TransactionInput::new();
        input.accept(InputField::Details, "Hotel").unwrap();
        input.accept(InputField::GrossTotal, "109.00").unwrap();

        let mut prompt = ScriptedPrompt::new(["9"]);
        let draft = complete_transaction(&mut prompt, input, RetryPolicy::unbounded()).unwrap();

        assert_eq!(draft.rate, VatRate::SecondReduced);
        assert_eq!(prompt.asked(), [InputField::Rate]);
    }

    #[test]
    fn test_rejected_value_leaves_input_unchanged() {
        let mut input = TransactionInput::new();
        input.accept(InputField::Details, "Hotel").unwrap();
        let before = input.clone();

        assert!(input.accept(InputField::GrossTotal, "12.345").is_err());
        assert_eq!(input, before);
        assert_eq!(input.next_field(), Some(InputField::GrossTotal));
    }

    #[test]
    fn test_livestock_rate_aborts() {
        let mut prompt = ScriptedPrompt::new(["Cattle", "1000", "4.8", "23"]);
        let err = collect_transaction(&mut prompt, RetryPolicy::unbounded()).unwrap_err();

        assert_eq!(err, LedgerError::UnsupportedRateForSchema(VatRate::Livestock));
        assert_eq!(prompt.remaining(), 1);
    }

    #[test]
    fn test_cancel_when_answers_run_out() {
        let mut prompt = ScriptedPrompt::new(["Consulting"]);
        let err = collect_transaction(&mut prompt, RetryPolicy::unbounded()).unwrap_err();
        assert_eq!(err, LedgerError::InputCancelled);
    }

    #[test]
    fn test_bounded_policy_gives_up() {
        let mut prompt = ScriptedPrompt::new(["Consulting", "x", "y", "z"]);
        let err = collect_transaction(&mut prompt, RetryPolicy::bounded(2)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::RetryLimitExceeded {
                field: "gross total".into(),
                attempts: 2,
            }
        );
        assert_eq!(prompt.remaining(), 1);
    }

    #[test]
    fn test_policy_from_config() {
        assert_eq!(
            RetryPolicy::from_config(&InputConfig { max_attempts: 0 }),
            RetryPolicy::unbounded()
        );
        assert_eq!(
            RetryPolicy::from_config(&InputConfig { max_attempts: 3 }),
            RetryPolicy::bounded(3)
        );
    }

    #[test]
    fn test_many_rejections_do_not_grow_the_stack() {
        let mut answers = vec!["Bulk".to_string()];
        answers.extend(std::iter::repeat_n("bad".to_string(), 10_000));
        answers.extend(["1.00".to_string(), "0".to_string()]);

        let mut prompt = ScriptedPrompt::new(answers);
        let draft = collect_transaction(&mut prompt, RetryPolicy::unbounded()).unwrap();
        assert_eq!(draft.rate, VatRate::Zero);
    }
}
