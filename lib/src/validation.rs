use soroban_sdk::{Address, Env, Vec};

use crate::{
    errors::RegistryError, Collateral, MAX_TRADE_FEE, MIN_DEPOSIT_RATE, MIN_LIQUIDATION_RATE,
};

pub fn validate_trade_fee(trade_fee: u32) -> Result<(), RegistryError> {
    if trade_fee >= MAX_TRADE_FEE {
        return Err(RegistryError::InvalidTradeFee);
    }
    Ok(())
}

/// Pair vectors must be parallel and no longer than `max_pairs`.
pub fn validate_pair_count(
    from_tokens: &Vec<Address>,
    to_tokens: &Vec<Address>,
    max_pairs: u32,
) -> Result<(), RegistryError> {
    if from_tokens.len() != to_tokens.len() {
        return Err(RegistryError::PairLengthMismatch);
    }
    if from_tokens.len() > max_pairs {
        return Err(RegistryError::TooManyPairs);
    }
    Ok(())
}

pub fn validate_collateral_rates(rates: &Collateral) -> Result<(), RegistryError> {
    let valid = rates.deposit_rate >= MIN_DEPOSIT_RATE
        && rates.liquidation_rate > MIN_LIQUIDATION_RATE
        && rates.deposit_rate > rates.liquidation_rate
        && rates.recall_rate > rates.deposit_rate;
    if !valid {
        return Err(RegistryError::InvalidCollateralRates);
    }
    Ok(())
}

/// The native asset is always valid; anything else must be whitelisted.
pub fn is_valid_token<F>(native: &Address, token: &Address, is_listed: F) -> bool
where
    F: Fn(&Address) -> bool,
{
    token == native || is_listed(token)
}

pub fn validate_pairs_listed<F>(
    native: &Address,
    from_tokens: &Vec<Address>,
    to_tokens: &Vec<Address>,
    is_listed: F,
) -> Result<(), RegistryError>
where
    F: Fn(&Address) -> bool,
{
    for (from, to) in from_tokens.iter().zip(to_tokens.iter()) {
        if !is_valid_token(native, &from, &is_listed) || !is_valid_token(native, &to, &is_listed) {
            return Err(RegistryError::TokenNotListed);
        }
    }
    Ok(())
}

/// Every pair must route back to the native asset through the relayer's own
/// pairs.
///
/// Tokens paired directly with native form the hub. A pair with no native leg
/// is accepted only if its `to` leg is in the hub. Membership is a linear scan
/// over the hub, which is bounded by the relayer's pair cap.
pub fn validate_hub(
    env: &Env,
    native: &Address,
    from_tokens: &Vec<Address>,
    to_tokens: &Vec<Address>,
) -> Result<(), RegistryError> {
    if from_tokens.len() != to_tokens.len() {
        return Err(RegistryError::PairLengthMismatch);
    }

    let mut hub: Vec<Address> = Vec::new(env);
    for (from, to) in from_tokens.iter().zip(to_tokens.iter()) {
        if &from == native {
            hub.push_back(to);
        } else if &to == native {
            hub.push_back(from);
        }
    }

    for (from, to) in from_tokens.iter().zip(to_tokens.iter()) {
        if &from != native && &to != native && index_of(&hub, &to).is_none() {
            return Err(RegistryError::HubRouteMissing);
        }
    }
    Ok(())
}

/// Position of the first occurrence of `item`.
pub fn index_of(items: &Vec<Address>, item: &Address) -> Option<u32> {
    for (i, candidate) in items.iter().enumerate() {
        if &candidate == item {
            return Some(i as u32);
        }
    }
    None
}

pub fn contains_term(terms: &Vec<u64>, term: u64) -> bool {
    terms.iter().any(|t| t == term)
}

/// Index of the pair `(from, to)` in a relayer's parallel pair vectors.
pub fn pair_index(
    from_tokens: &Vec<Address>,
    to_tokens: &Vec<Address>,
    from: &Address,
    to: &Address,
) -> Option<u32> {
    for (i, (f, t)) in from_tokens.iter().zip(to_tokens.iter()).enumerate() {
        if &f == from && &t == to {
            return Some(i as u32);
        }
    }
    None
}
