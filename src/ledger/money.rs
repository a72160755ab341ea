//! Overflow-checked money arithmetic.
//!
//! `Decimal` operators panic on overflow. Every total the ledger reports
//! goes through these helpers instead.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Largest amount accepted for a single payment or rate.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn out_of_range(what: &str) -> EngineError {
    EngineError::validation("amount", format!("{} exceeds the supported range", what))
}

/// `a + b`, or a validation error naming `what` on overflow.
pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| out_of_range(what))
}

/// `a - b`, or a validation error naming `what` on overflow.
pub(crate) fn sub(a: Decimal, b: Decimal, what: &str) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| out_of_range(what))
}

/// Sums `amounts`, failing instead of panicking on overflow.
pub(crate) fn total<I>(amounts: I, what: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| add(acc, amount, what))
}

/// Rejects amounts above [`MAX_AMOUNT`].
pub(crate) fn check_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount > MAX_AMOUNT {
        return Err(EngineError::validation(
            field,
            format!("must not exceed {}, got {}", MAX_AMOUNT, amount),
        ));
    }
    Ok(())
}
