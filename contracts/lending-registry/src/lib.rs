#![no_std]

mod storage;


use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Symbol, Vec};
use xdcx_lib::{
    admin,
    ports::{IssuedTokenPortClient, RelayerRegistryPortClient, TokenListingPortClient},
    validation::{contains_term, index_of, is_valid_token, validate_collateral_rates, validate_trade_fee},
    Collateral, CollateralPrice, CollateralScope, LendingConfig, LendingRelayer, RegistryError,
    BASE_TOKEN_ADDED, COLLATERAL_ADDED, COLLATERAL_PRICE_SET, FEEDER_CHANGED,
    ILO_COLLATERAL_ADDED, LENDING_UPDATED, MIN_LENDING_TERM_SECONDS, TERM_ADDED,
};

use storage::*;

/// Lending profiles for registered relayers, plus the global lending
/// configuration: base tokens, terms, collaterals and collateral prices.
#[contract]
pub struct LendingRegistry;

#[contractimpl]
impl LendingRegistry {
    pub fn init_contract(
        env: Env,
        moderator: Address,
        native_token: Address,
        token_listing: Address,
        relayer_registry: Address,
        oracle_price_feeder: Address,
    ) -> Result<(), RegistryError> {
        if admin::has_admin(&env) {
            panic_with_error!(&env, RegistryError::AlreadyInitialized);
        }
        moderator.require_auth();

        admin::set_admin(&env, &moderator);
        set_config(
            &env,
            &LendingConfig {
                native_token,
                token_listing,
                relayer_registry,
                oracle_price_feeder,
            },
        );
        bump_instance(&env);
        Ok(())
    }

    /* ---------------- ROLES ---------------- */

    pub fn change_moderator(
        env: Env,
        moderator: Address,
        new_moderator: Address,
    ) -> Result<(), RegistryError> {
        admin::transfer_admin(&env, &moderator, &new_moderator)
    }

    pub fn change_oracle_price_feeder(
        env: Env,
        moderator: Address,
        feeder: Address,
    ) -> Result<(), RegistryError> {
        moderator.require_auth();
        admin::verify_admin(&env, &moderator)?;

        let mut config = get_config(&env)?;
        config.oracle_price_feeder = feeder.clone();
        set_config(&env, &config);

        env.events()
            .publish((Symbol::new(&env, FEEDER_CHANGED),), feeder);
        Ok(())
    }

    /* ---------------- GLOBAL CONFIGURATION ---------------- */

    /// Add or re-rate a standard collateral.
    pub fn add_collateral(
        env: Env,
        moderator: Address,
        token: Address,
        deposit_rate: u32,
        liquidation_rate: u32,
        recall_rate: u32,
    ) -> Result<(), RegistryError> {
        moderator.require_auth();
        admin::verify_admin(&env, &moderator)?;
        let config = get_config(&env)?;

        let rates = Collateral {
            deposit_rate,
            liquidation_rate,
            recall_rate,
        };
        validate_collateral_rates(&rates)?;
        if !is_valid(&env, &config, &token) {
            return Err(RegistryError::TokenNotListed);
        }

        append_if_absent(&env, &DataKey::Collaterals, &token);
        set_collateral(&env, &token, &rates);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, COLLATERAL_ADDED), token),
            (deposit_rate, liquidation_rate, recall_rate),
        );
        Ok(())
    }

    /// A token issuer lists their own token as collateral. Calling again
    /// overwrites the rates.
    pub fn add_ilo_collateral(
        env: Env,
        caller: Address,
        token: Address,
        deposit_rate: u32,
        liquidation_rate: u32,
        recall_rate: u32,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let config = get_config(&env)?;

        let rates = Collateral {
            deposit_rate,
            liquidation_rate,
            recall_rate,
        };
        validate_collateral_rates(&rates)?;
        if index_of(&get_address_set(&env, &DataKey::Collaterals), &token).is_some() {
            return Err(RegistryError::CollateralAlreadyStandard);
        }
        if !TokenListingPortClient::new(&env, &config.token_listing).is_listed(&token) {
            return Err(RegistryError::TokenNotListed);
        }
        ensure_issuer(&env, &token, &caller)?;

        append_if_absent(&env, &DataKey::IloCollaterals, &token);
        set_collateral(&env, &token, &rates);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, ILO_COLLATERAL_ADDED), token),
            (caller, deposit_rate, liquidation_rate, recall_rate),
        );
        Ok(())
    }

    /// Record the price of `token` in units of `lending_token`, stamped with
    /// the current ledger sequence. Standard collaterals are priced by the
    /// oracle feeder, ILO collaterals by their issuer.
    pub fn set_collateral_price(
        env: Env,
        caller: Address,
        token: Address,
        lending_token: Address,
        price: i128,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let config = get_config(&env)?;

        if !is_valid(&env, &config, &token) {
            return Err(RegistryError::TokenNotListed);
        }
        if index_of(&get_address_set(&env, &DataKey::Bases), &lending_token).is_none() {
            return Err(RegistryError::BaseTokenNotSupported);
        }
        if get_collateral(&env, &token).is_none() {
            return Err(RegistryError::CollateralNotConfigured);
        }
        if price <= 0 {
            return Err(RegistryError::InvalidPrice);
        }

        if index_of(&get_address_set(&env, &DataKey::Collaterals), &token).is_some() {
            if caller != config.oracle_price_feeder {
                return Err(RegistryError::Unauthorized);
            }
        } else if index_of(&get_address_set(&env, &DataKey::IloCollaterals), &token).is_some() {
            ensure_issuer(&env, &token, &caller)?;
        } else {
            return Err(RegistryError::CollateralNotConfigured);
        }

        let snapshot = CollateralPrice {
            price,
            block_number: env.ledger().sequence(),
        };
        set_price(&env, &token, &lending_token, &snapshot);

        env.events().publish(
            (Symbol::new(&env, COLLATERAL_PRICE_SET), token, lending_token),
            (price, snapshot.block_number),
        );
        Ok(())
    }

    pub fn add_base_token(env: Env, moderator: Address, token: Address) -> Result<(), RegistryError> {
        moderator.require_auth();
        admin::verify_admin(&env, &moderator)?;
        let config = get_config(&env)?;

        if !is_valid(&env, &config, &token) {
            return Err(RegistryError::TokenNotListed);
        }
        if append_if_absent(&env, &DataKey::Bases, &token) {
            bump_instance(&env);
            env.events()
                .publish((Symbol::new(&env, BASE_TOKEN_ADDED),), token);
        }
        Ok(())
    }

    pub fn add_term(env: Env, moderator: Address, term: u64) -> Result<(), RegistryError> {
        moderator.require_auth();
        admin::verify_admin(&env, &moderator)?;

        if term < MIN_LENDING_TERM_SECONDS {
            return Err(RegistryError::TermTooShort);
        }
        let mut terms = get_terms(&env);
        if !contains_term(&terms, term) {
            terms.push_back(term);
            set_terms(&env, &terms);
            bump_instance(&env);
            env.events().publish((Symbol::new(&env, TERM_ADDED),), term);
        }
        Ok(())
    }

    /* ---------------- LENDING RELAYERS ---------------- */

    /// Replace the lending profile of `coinbase`. `collaterals[i]` is either
    /// `All` standard collaterals or one ILO collateral.
    pub fn update(
        env: Env,
        caller: Address,
        coinbase: Address,
        trade_fee: u32,
        base_tokens: Vec<Address>,
        terms: Vec<u64>,
        collaterals: Vec<CollateralScope>,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let config = get_config(&env)?;
        ensure_relayer_owner(&env, &config, &coinbase, &caller)?;

        validate_trade_fee(trade_fee)?;
        if base_tokens.len() != terms.len() || base_tokens.len() != collaterals.len() {
            return Err(RegistryError::PairLengthMismatch);
        }

        let bases = get_address_set(&env, &DataKey::Bases);
        for token in base_tokens.iter() {
            if index_of(&bases, &token).is_none() {
                return Err(RegistryError::BaseTokenNotSupported);
            }
        }
        let known_terms = get_terms(&env);
        for term in terms.iter() {
            if !contains_term(&known_terms, term) {
                return Err(RegistryError::TermNotSupported);
            }
        }
        let ilo_collaterals = get_address_set(&env, &DataKey::IloCollaterals);
        for scope in collaterals.iter() {
            if let CollateralScope::Only(token) = scope {
                if index_of(&ilo_collaterals, &token).is_none() {
                    return Err(RegistryError::CollateralNotSupported);
                }
            }
        }

        let relayer = LendingRelayer {
            trade_fee,
            base_tokens,
            terms,
            collaterals,
        };
        set_lending_relayer(&env, &coinbase, &relayer);

        env.events().publish(
            (Symbol::new(&env, LENDING_UPDATED), coinbase),
            (caller, trade_fee),
        );
        Ok(())
    }

    /// Overwrite only the fee. A coinbase without a profile gets an empty one.
    pub fn update_fee(
        env: Env,
        caller: Address,
        coinbase: Address,
        trade_fee: u32,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let config = get_config(&env)?;
        ensure_relayer_owner(&env, &config, &coinbase, &caller)?;
        validate_trade_fee(trade_fee)?;

        let mut relayer = get_lending_relayer(&env, &coinbase).unwrap_or_else(|| LendingRelayer {
            trade_fee,
            base_tokens: Vec::new(&env),
            terms: Vec::new(&env),
            collaterals: Vec::new(&env),
        });
        relayer.trade_fee = trade_fee;
        set_lending_relayer(&env, &coinbase, &relayer);

        env.events().publish(
            (Symbol::new(&env, LENDING_UPDATED), coinbase),
            (caller, trade_fee),
        );
        Ok(())
    }

    /* ---------------- READS ---------------- */

    pub fn get_lending_relayer(env: Env, coinbase: Address) -> Option<LendingRelayer> {
        get_lending_relayer(&env, &coinbase)
    }

    pub fn get_collateral(env: Env, token: Address) -> Option<Collateral> {
        get_collateral(&env, &token)
    }

    pub fn get_collateral_price(
        env: Env,
        token: Address,
        lending_token: Address,
    ) -> Option<CollateralPrice> {
        get_price(&env, &token, &lending_token)
    }

    pub fn get_bases(env: Env) -> Vec<Address> {
        get_address_set(&env, &DataKey::Bases)
    }

    pub fn get_terms(env: Env) -> Vec<u64> {
        get_terms(&env)
    }

    pub fn get_collaterals(env: Env) -> Vec<Address> {
        get_address_set(&env, &DataKey::Collaterals)
    }

    pub fn get_ilo_collaterals(env: Env) -> Vec<Address> {
        get_address_set(&env, &DataKey::IloCollaterals)
    }

    pub fn moderator(env: Env) -> Result<Address, RegistryError> {
        admin::get_admin(&env)
    }

    pub fn oracle_price_feeder(env: Env) -> Result<Address, RegistryError> {
        Ok(get_config(&env)?.oracle_price_feeder)
    }
}

/* ---------------- HELPERS ---------------- */

fn is_valid(env: &Env, config: &LendingConfig, token: &Address) -> bool {
    let listing = TokenListingPortClient::new(env, &config.token_listing);
    is_valid_token(&config.native_token, token, |t| listing.is_listed(t))
}

fn ensure_issuer(env: &Env, token: &Address, caller: &Address) -> Result<(), RegistryError> {
    if &IssuedTokenPortClient::new(env, token).issuer() != caller {
        return Err(RegistryError::NotTokenIssuer);
    }
    Ok(())
}

/// The caller must own the coinbase's trading relayer, and the relayer must
/// not be resigning.
fn ensure_relayer_owner(
    env: &Env,
    config: &LendingConfig,
    coinbase: &Address,
    caller: &Address,
) -> Result<(), RegistryError> {
    let relayers = RelayerRegistryPortClient::new(env, &config.relayer_registry);
    let owner = relayers
        .owner_of(coinbase)
        .ok_or(RegistryError::RelayerNotRegistered)?;
    if &owner != caller {
        return Err(RegistryError::Unauthorized);
    }
    if relayers.is_closing(coinbase) {
        return Err(RegistryError::RelayerClosing);
    }
    Ok(())
}

/// Linear-scan insert. Returns whether the set grew.
fn append_if_absent(env: &Env, key: &DataKey, token: &Address) -> bool {
    let mut items = get_address_set(env, key);
    if index_of(&items, token).is_some() {
        return false;
    }
    items.push_back(token.clone());
    set_address_set(env, key, &items);
    true
}
