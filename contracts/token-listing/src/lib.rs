#![no_std]

mod storage;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Env, Vec};
use xdcx_lib::{admin, RegistryError, DEFAULT_LISTING_FEE, TOKEN_LISTED};

use storage::*;

/// Whitelist of tradable tokens. A token is listed by paying the listing fee,
/// which goes straight to the foundation account. There is no delisting.
#[contract]
pub struct TokenListing;

#[contractimpl]
impl TokenListing {
    pub fn init_contract(
        env: Env,
        admin: Address,
        native_token: Address,
        foundation: Address,
        listing_fee: Option<i128>,
    ) -> Result<(), RegistryError> {
        if admin::has_admin(&env) {
            panic_with_error!(&env, RegistryError::AlreadyInitialized);
        }
        admin.require_auth();

        let listing_fee = listing_fee.unwrap_or(DEFAULT_LISTING_FEE);
        if listing_fee <= 0 {
            return Err(RegistryError::InvalidConfiguration);
        }

        admin::set_admin(&env, &admin);
        set_config(
            &env,
            &ListingConfig {
                native_token,
                foundation,
                listing_fee,
            },
        );
        set_tokens(&env, &Vec::new(&env));
        bump_instance(&env);
        Ok(())
    }

    /// Pay exactly the listing fee to whitelist `token`.
    pub fn list_token(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let config = get_config(&env)?;

        if amount != config.listing_fee {
            return Err(RegistryError::ListingFeeMismatch);
        }
        if token == config.native_token {
            return Err(RegistryError::NativeTokenImplicit);
        }
        if is_active(&env, &token) {
            return Err(RegistryError::TokenAlreadyListed);
        }

        token::Client::new(&env, &config.native_token).transfer(
            &caller,
            &config.foundation,
            &amount,
        );

        let mut tokens = get_tokens(&env);
        tokens.push_back(token.clone());
        set_tokens(&env, &tokens);
        set_active(&env, &token);
        bump_instance(&env);

        env.events()
            .publish((TOKEN_LISTED, token), (caller, amount));
        Ok(())
    }

    /// The native asset is never stored here; callers treat it as listed.
    pub fn is_listed(env: Env, token: Address) -> bool {
        is_active(&env, &token)
    }

    pub fn get_tokens(env: Env) -> Vec<Address> {
        get_tokens(&env)
    }

    pub fn listing_fee(env: Env) -> Result<i128, RegistryError> {
        Ok(get_config(&env)?.listing_fee)
    }

    pub fn foundation(env: Env) -> Result<Address, RegistryError> {
        Ok(get_config(&env)?.foundation)
    }
}
