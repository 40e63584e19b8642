//! Holder Normalizer
//!
//! Turns raw indexing-API holder entries into a ranked `HolderRecord` list
//! and scales base-unit balances into whole-token amounts.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::FromPrimitive;
use serde_json::Value;

use crate::models::types::{HolderRecord, RawHolder};

/// Rank raw holders by base-unit balance, largest first.
///
/// Missing or malformed balances count as zero; the sort is stable so
/// equal balances keep their input order.
pub fn normalize(raw_holders: &[RawHolder]) -> Vec<HolderRecord> {
    let mut holders: Vec<HolderRecord> = raw_holders
        .iter()
        .map(|h| HolderRecord::new(h.wallet_address.clone(), parse_balance(h.balance.as_ref())))
        .collect();

    holders.sort_by(|a, b| b.raw_balance.cmp(&a.raw_balance));
    holders
}

/// Fill `human_balance = raw_balance / 10^decimals` on every record.
pub fn attach_human_balances(mut holders: Vec<HolderRecord>, decimals: u32) -> Vec<HolderRecord> {
    for holder in holders.iter_mut() {
        holder.human_balance = Some(to_human(&holder.raw_balance, decimals));
    }
    holders
}

/// Exact decimal scaling of a base-unit amount
pub fn to_human(raw: &BigUint, decimals: u32) -> BigDecimal {
    BigDecimal::new(BigInt::from(raw.clone()), i64::from(decimals))
}

/// Parse a balance given as a digit string or a JSON number.
pub fn parse_balance(value: Option<&Value>) -> BigUint {
    match value {
        Some(Value::String(s)) => s.trim().parse::<BigUint>().unwrap_or_default(),
        Some(Value::Number(n)) => {
            // integer literals of any size parse exactly (arbitrary_precision)
            if let Ok(v) = n.to_string().parse::<BigUint>() {
                v
            } else {
                // fractional numbers truncate, negatives are not balances
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .and_then(|f| BigUint::from_f64(f.trunc()))
                    .unwrap_or_default()
            }
        }
        _ => BigUint::default(),
    }
}
