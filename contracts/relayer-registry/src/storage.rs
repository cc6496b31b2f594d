use soroban_sdk::{contracttype, Address, Env, Vec};
use xdcx_lib::{
    RegistryError, Relayer, RelayerConfig, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Limits and collaborator addresses
    Config,
    /// Coinbase index array; `Relayer::index` points into it
    Coinbases,
    /// Registered relayers without a resign request
    ActiveCount,
    /// Relayer record by coinbase
    Relayer(Address),
    /// Earliest refund time by coinbase
    ResignRequest(Address),
    /// Asking price by coinbase
    SalePrice(Address),
    /// Number of coinbases owned by an address
    OwnedCount(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/* ---------------- CONFIG ---------------- */

pub fn set_config(env: &Env, config: &RelayerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<RelayerConfig, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(RegistryError::NotInitialized)
}

/* ---------------- INDEX ARRAY & COUNTS ---------------- */

pub fn get_coinbases(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Coinbases)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_coinbases(env: &Env, coinbases: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Coinbases, coinbases);
}

pub fn get_active_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ActiveCount)
        .unwrap_or(0)
}

pub fn set_active_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ActiveCount, &count);
}

/* ---------------- RELAYERS ---------------- */

pub fn get_relayer(env: &Env, coinbase: &Address) -> Option<Relayer> {
    env.storage()
        .persistent()
        .get(&DataKey::Relayer(coinbase.clone()))
}

pub fn set_relayer(env: &Env, coinbase: &Address, relayer: &Relayer) {
    let key = DataKey::Relayer(coinbase.clone());
    env.storage().persistent().set(&key, relayer);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn remove_relayer(env: &Env, coinbase: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Relayer(coinbase.clone()));
}

/* ---------------- RESIGN REQUESTS ---------------- */

pub fn get_resign_request(env: &Env, coinbase: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::ResignRequest(coinbase.clone()))
}

pub fn set_resign_request(env: &Env, coinbase: &Address, unlock_at: u64) {
    let key = DataKey::ResignRequest(coinbase.clone());
    env.storage().persistent().set(&key, &unlock_at);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn remove_resign_request(env: &Env, coinbase: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::ResignRequest(coinbase.clone()));
}

/* ---------------- SALE LISTINGS ---------------- */

pub fn get_sale_price(env: &Env, coinbase: &Address) -> Option<i128> {
    env.storage()
        .persistent()
        .get(&DataKey::SalePrice(coinbase.clone()))
}

pub fn set_sale_price(env: &Env, coinbase: &Address, price: i128) {
    let key = DataKey::SalePrice(coinbase.clone());
    env.storage().persistent().set(&key, &price);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn remove_sale_price(env: &Env, coinbase: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::SalePrice(coinbase.clone()));
}

/* ---------------- OWNERSHIP ---------------- */

pub fn get_owned_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OwnedCount(owner.clone()))
        .unwrap_or(0)
}

pub fn add_owned(env: &Env, owner: &Address) {
    let key = DataKey::OwnedCount(owner.clone());
    let count = get_owned_count(env, owner) + 1;
    env.storage().persistent().set(&key, &count);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn remove_owned(env: &Env, owner: &Address) {
    let key = DataKey::OwnedCount(owner.clone());
    match get_owned_count(env, owner) {
        0 | 1 => env.storage().persistent().remove(&key),
        count => env.storage().persistent().set(&key, &(count - 1)),
    }
}
