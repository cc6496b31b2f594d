#![cfg(any(test, feature = "testutils"))]

//! Stand-ins for the contracts behind the ports in `crate::ports`.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Listed(Address),
    Owner(Address),
    Closing(Address),
    Issuer,
}

/// Whitelist fake: tokens are listed by calling `set_listed`.
#[contract]
pub struct MockTokenListing;

#[contractimpl]
impl MockTokenListing {
    pub fn set_listed(env: Env, token: Address, listed: bool) {
        env.storage().instance().set(&MockKey::Listed(token), &listed);
    }

    pub fn is_listed(env: Env, token: Address) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Listed(token))
            .unwrap_or(false)
    }
}

/// Relayer registry fake exposing ownership and resign state.
#[contract]
pub struct MockRelayerRegistry;

#[contractimpl]
impl MockRelayerRegistry {
    pub fn set_owner(env: Env, coinbase: Address, owner: Address) {
        env.storage().instance().set(&MockKey::Owner(coinbase), &owner);
    }

    pub fn set_closing(env: Env, coinbase: Address, closing: bool) {
        env.storage()
            .instance()
            .set(&MockKey::Closing(coinbase), &closing);
    }

    pub fn owner_of(env: Env, coinbase: Address) -> Option<Address> {
        env.storage().instance().get(&MockKey::Owner(coinbase))
    }

    pub fn is_closing(env: Env, coinbase: Address) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Closing(coinbase))
            .unwrap_or(false)
    }
}

/// TRC21-style token fake with a fixed issuer.
#[contract]
pub struct MockIssuedToken;

#[contractimpl]
impl MockIssuedToken {
    pub fn __constructor(env: Env, issuer: Address) {
        env.storage().instance().set(&MockKey::Issuer, &issuer);
    }

    pub fn issuer(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&MockKey::Issuer)
            .expect("issuer not set")
    }
}
