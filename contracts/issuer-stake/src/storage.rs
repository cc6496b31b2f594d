use soroban_sdk::{contracttype, Address, Env, Vec};
use xdcx_lib::{
    RegistryError, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND,
    PERSISTENT_TTL_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    NativeToken,
    MinCap,
    /// Tokens with an issuer application, in first-apply order
    Tokens,
    /// Accumulated stake by token
    Capacity(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn set_native_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeToken, token);
}

pub fn get_native_token(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .ok_or(RegistryError::NotInitialized)
}

pub fn set_min_cap(env: &Env, min_cap: i128) {
    env.storage().instance().set(&DataKey::MinCap, &min_cap);
}

pub fn get_min_cap(env: &Env) -> Result<i128, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::MinCap)
        .ok_or(RegistryError::NotInitialized)
}

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

pub fn get_capacity(env: &Env, token: &Address) -> Option<i128> {
    env.storage()
        .persistent()
        .get(&DataKey::Capacity(token.clone()))
}

pub fn set_capacity(env: &Env, token: &Address, capacity: i128) {
    let key = DataKey::Capacity(token.clone());
    env.storage().persistent().set(&key, &capacity);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
