//! Read-only views of sibling contracts.
//!
//! The registries only talk to each other through these traits, so tests can
//! stand up the fakes in `testutils` instead of the real contracts.

use soroban_sdk::{contractclient, Address, Env};

/// Token whitelist. The native asset is never stored here; callers treat it
/// as implicitly listed.
#[contractclient(name = "TokenListingPortClient")]
pub trait TokenListingPort {
    fn is_listed(env: Env, token: Address) -> bool;
}

/// What the lending registry needs to know about a trading relayer.
#[contractclient(name = "RelayerRegistryPortClient")]
pub trait RelayerRegistryPort {
    fn owner_of(env: Env, coinbase: Address) -> Option<Address>;
    fn is_closing(env: Env, coinbase: Address) -> bool;
}

/// A TRC21-style token that exposes its issuer.
#[contractclient(name = "IssuedTokenPortClient")]
pub trait IssuedTokenPort {
    fn issuer(env: Env) -> Address;
}
