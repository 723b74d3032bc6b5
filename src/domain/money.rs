//! Monetary types and settlement-asset unit conversion.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fiat-equivalent amount (USD) represented as a Decimal for precision.
pub type Amount = Decimal;

/// Fiat value of one unit of the traded asset; 1.0 is parity.
pub type Rate = Decimal;

/// Decimal places of the settlement asset (USDC).
pub const SETTLEMENT_DECIMALS: u32 = 6;

/// Largest exponent whose power of ten still fits a u64.
const MAX_DECIMALS: u32 = 19;

/// Convert a decimal amount to the asset's smallest unit.
///
/// Digits beyond `decimals` are truncated. Returns `None` for negative
/// amounts or values that do not fit a u128.
pub fn to_base_units(amount: Amount, decimals: u32) -> Option<u128> {
    if amount.is_sign_negative() || decimals > MAX_DECIMALS {
        return None;
    }
    let scale = Decimal::from(10u64.pow(decimals));
    amount.checked_mul(scale)?.trunc().to_u128()
}

/// Convert smallest-unit integer back to a decimal amount.
pub fn from_base_units(units: u128, decimals: u32) -> Option<Amount> {
    let units = i128::try_from(units).ok()?;
    Decimal::try_from_i128_with_scale(units, decimals)
        .ok()
        .map(|d| d.normalize())
}
