#![no_std]

mod storage;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Env, Vec};
use xdcx_lib::{
    admin, ports::IssuedTokenPortClient, RegistryError, DEFAULT_MIN_CAP, STAKE_APPLIED,
    STAKE_CHARGED,
};

use storage::*;

/// Stake ("capacity") held per token. Issuers open a token with `apply`;
/// anyone may top it up with `charge`. Stake only ever grows.
#[contract]
pub struct IssuerStake;

#[contractimpl]
impl IssuerStake {
    pub fn init_contract(
        env: Env,
        admin: Address,
        native_token: Address,
        min_cap: Option<i128>,
    ) -> Result<(), RegistryError> {
        if admin::has_admin(&env) {
            panic_with_error!(&env, RegistryError::AlreadyInitialized);
        }
        admin.require_auth();

        let min_cap = min_cap.unwrap_or(DEFAULT_MIN_CAP);
        if min_cap <= 0 {
            return Err(RegistryError::InvalidConfiguration);
        }

        admin::set_admin(&env, &admin);
        set_native_token(&env, &native_token);
        set_min_cap(&env, min_cap);
        set_tokens(&env, &Vec::new(&env));
        bump_instance(&env);
        Ok(())
    }

    pub fn set_min_cap(env: Env, admin: Address, min_cap: i128) -> Result<(), RegistryError> {
        admin.require_auth();
        admin::verify_admin(&env, &admin)?;
        if min_cap <= 0 {
            return Err(RegistryError::InvalidConfiguration);
        }
        set_min_cap(&env, min_cap);
        Ok(())
    }

    pub fn transfer_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), RegistryError> {
        admin::transfer_admin(&env, &current_admin, &new_admin)
    }

    /// Issuer stake for `token`. The caller must be the token's issuer and
    /// put up at least the minimum cap. Repeat applications add to the stake.
    pub fn apply(env: Env, caller: Address, token: Address, amount: i128) -> Result<(), RegistryError> {
        caller.require_auth();

        if IssuedTokenPortClient::new(&env, &token).issuer() != caller {
            return Err(RegistryError::NotTokenIssuer);
        }
        if amount < get_min_cap(&env)? {
            return Err(RegistryError::CapacityTooLow);
        }

        stake(&env, &caller, &token, amount)?;
        env.events()
            .publish((STAKE_APPLIED, token), (caller, amount));
        Ok(())
    }

    /// Top up the stake of an applied token. Anyone may charge.
    pub fn charge(env: Env, caller: Address, token: Address, amount: i128) -> Result<(), RegistryError> {
        caller.require_auth();

        if get_capacity(&env, &token).is_none() {
            return Err(RegistryError::TokenNotApplied);
        }
        if amount <= 0 {
            return Err(RegistryError::InvalidAmount);
        }

        stake(&env, &caller, &token, amount)?;
        env.events()
            .publish((STAKE_CHARGED, token), (caller, amount));
        Ok(())
    }

    pub fn get_token_capacity(env: Env, token: Address) -> i128 {
        get_capacity(&env, &token).unwrap_or(0)
    }

    pub fn get_tokens(env: Env) -> Vec<Address> {
        get_tokens(&env)
    }

    pub fn min_cap(env: Env) -> Result<i128, RegistryError> {
        get_min_cap(&env)
    }
}

/// Pull `amount` of the native asset from `from` and credit it to `token`.
fn stake(env: &Env, from: &Address, token: &Address, amount: i128) -> Result<(), RegistryError> {
    let native = get_native_token(env)?;
    token::Client::new(env, &native).transfer(from, &env.current_contract_address(), &amount);

    let capacity = match get_capacity(env, token) {
        Some(current) => current
            .checked_add(amount)
            .ok_or(RegistryError::InvalidAmount)?,
        None => {
            let mut tokens = get_tokens(env);
            tokens.push_back(token.clone());
            set_tokens(env, &tokens);
            amount
        }
    };
    set_capacity(env, token, capacity);
    bump_instance(env);
    Ok(())
}
