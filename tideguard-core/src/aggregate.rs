//! Flag rollup
//!
//! Combines the sequences of every test that ran into one flag per
//! observation: the worst flag wins, under
//! `Fail > Suspect > NotEvaluated > Pass`. A failing test is never hidden by
//! the others passing.
//!
//! "No test ran" is different from "tests ran and abstained": with zero
//! sequences every observation rolls up to `NotEvaluated`.

use crate::{
    errors::{QcError, QcResult},
    flags::{Flag, FlagSequence},
};

/// Worst-wins rollup over `sequences`, each of which must have `len` flags
pub fn rollup<'a, I>(len: usize, sequences: I) -> QcResult<FlagSequence>
where
    I: IntoIterator<Item = &'a FlagSequence>,
{
    let mut combined: Option<Vec<Flag>> = None;

    for sequence in sequences {
        if sequence.len() != len {
            return Err(QcError::LengthMismatch {
                expected: len,
                actual: sequence.len(),
            });
        }

        combined = Some(match combined {
            None => sequence.as_slice().to_vec(),
            Some(mut worst) => {
                for (slot, flag) in worst.iter_mut().zip(sequence.iter()) {
                    *slot = slot.worst(flag);
                }
                worst
            }
        });
    }

    Ok(combined
        .map(FlagSequence::from)
        .unwrap_or_else(|| FlagSequence::filled(Flag::NotEvaluated, len)))
}
