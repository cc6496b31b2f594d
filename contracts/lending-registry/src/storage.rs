use soroban_sdk::{contracttype, Address, Env, Vec};
use xdcx_lib::{
    Collateral, CollateralPrice, LendingConfig, LendingRelayer, RegistryError,
    INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    /// Lending (base) tokens
    Bases,
    /// Loan terms in seconds
    Terms,
    /// Moderator-listed collaterals
    Collaterals,
    /// Issuer-listed collaterals
    IloCollaterals,
    /// Rates by collateral token
    Collateral(Address),
    /// Price snapshot: (collateral token, lending token)
    Price(Address, Address),
    /// Lending profile by coinbase
    LendingRelayer(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/* ---------------- CONFIG ---------------- */

pub fn set_config(env: &Env, config: &LendingConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<LendingConfig, RegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(RegistryError::NotInitialized)
}

/* ---------------- GLOBAL SETS ---------------- */

pub fn get_address_set(env: &Env, key: &DataKey) -> Vec<Address> {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_address_set(env: &Env, key: &DataKey, items: &Vec<Address>) {
    env.storage().instance().set(key, items);
}

pub fn get_terms(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::Terms)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_terms(env: &Env, terms: &Vec<u64>) {
    env.storage().instance().set(&DataKey::Terms, terms);
}

/* ---------------- COLLATERALS ---------------- */

pub fn get_collateral(env: &Env, token: &Address) -> Option<Collateral> {
    env.storage()
        .persistent()
        .get(&DataKey::Collateral(token.clone()))
}

pub fn set_collateral(env: &Env, token: &Address, collateral: &Collateral) {
    let key = DataKey::Collateral(token.clone());
    env.storage().persistent().set(&key, collateral);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn get_price(env: &Env, token: &Address, lending_token: &Address) -> Option<CollateralPrice> {
    env.storage()
        .persistent()
        .get(&DataKey::Price(token.clone(), lending_token.clone()))
}

pub fn set_price(env: &Env, token: &Address, lending_token: &Address, price: &CollateralPrice) {
    let key = DataKey::Price(token.clone(), lending_token.clone());
    env.storage().persistent().set(&key, price);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

/* ---------------- LENDING RELAYERS ---------------- */

pub fn get_lending_relayer(env: &Env, coinbase: &Address) -> Option<LendingRelayer> {
    env.storage()
        .persistent()
        .get(&DataKey::LendingRelayer(coinbase.clone()))
}

pub fn set_lending_relayer(env: &Env, coinbase: &Address, relayer: &LendingRelayer) {
    let key = DataKey::LendingRelayer(coinbase.clone());
    env.storage().persistent().set(&key, relayer);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
