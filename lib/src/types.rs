use soroban_sdk::{contracttype, Address, Vec};

/// A trading relayer, keyed by its coinbase.
///
/// `from_tokens[i]`/`to_tokens[i]` form the i-th trading pair. `index` is the
/// slot of the coinbase in the registry's coinbase array.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Relayer {
    pub index: u32,
    pub owner: Address,
    pub deposit: i128,
    pub trade_fee: u32,
    pub from_tokens: Vec<Address>,
    pub to_tokens: Vec<Address>,
}

/// Admin-tunable limits of the relayer registry.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RelayerConfig {
    pub native_token: Address,
    pub token_listing: Address,
    pub max_relayers: u32,
    pub max_token_list: u32,
    pub min_deposit: i128,
}

/// Result of a refund attempt. A locked refund is an answer, not a failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum RefundOutcome {
    /// Relayer removed; the full deposit was paid to the owner.
    Refunded(i128),
    /// Lock still running; seconds left until a refund is possible.
    Locked(u64),
}

/// Rates are percentages scaled by 100 (150 == 150%).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Collateral {
    pub deposit_rate: u32,
    pub liquidation_rate: u32,
    pub recall_rate: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CollateralPrice {
    pub price: i128,
    pub block_number: u32,
}

/// Collateral accepted for one lending pair.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CollateralScope {
    /// Any standard collateral.
    All,
    /// Only this ILO collateral.
    Only(Address),
}

/// Lending profile of a coinbase. The three vectors are parallel.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LendingRelayer {
    pub trade_fee: u32,
    pub base_tokens: Vec<Address>,
    pub terms: Vec<u64>,
    pub collaterals: Vec<CollateralScope>,
}

/// Collaborators and roles of the lending registry. The moderator is the
/// contract admin and is stored separately.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LendingConfig {
    pub native_token: Address,
    pub token_listing: Address,
    pub relayer_registry: Address,
    pub oracle_price_feeder: Address,
}
