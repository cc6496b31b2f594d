use soroban_sdk::{contracttype, Address, Env, Vec};
use xdcx_lib::{
    RegistryError, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND,
    PERSISTENT_TTL_THRESHOLD,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingConfig {
    pub native_token: Address,
    pub foundation: Address,
    pub listing_fee: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    /// Listed tokens in listing order
    Tokens,
    /// Whitelist flag by token
    Active(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn set_config(env: &Env, config: &ListingConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<ListingConfig, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(RegistryError::NotInitialized)
}

// Per-token state stays out of instance storage, which is loaded on every
// call and would make `is_listed` grow with the whitelist.

pub fn get_tokens(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Tokens)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_tokens(env: &Env, tokens: &Vec<Address>) {
    env.storage().persistent().set(&DataKey::Tokens, tokens);
    env.storage().persistent().extend_ttl(
        &DataKey::Tokens,
        PERSISTENT_TTL_THRESHOLD,
        PERSISTENT_TTL_EXTEND,
    );
}

pub fn is_active(env: &Env, token: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Active(token.clone()))
        .unwrap_or(false)
}

pub fn set_active(env: &Env, token: &Address) {
    let key = DataKey::Active(token.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
