#![no_std]

mod storage;

#[cfg(test)]
mod test_marketplace;

use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Env, Symbol, Vec};
use xdcx_lib::{
    admin,
    ports::TokenListingPortClient,
    validation::{
        pair_index, validate_hub, validate_pair_count, validate_pairs_listed, validate_trade_fee,
    },
    RefundOutcome, RegistryError, Relayer, RelayerConfig, DEFAULT_MAX_RELAYERS,
    DEFAULT_MAX_TOKEN_LIST, DEFAULT_MIN_DEPOSIT, MAX_TOKEN_LIST_CAP, MIN_TOP_UP,
    REFUND_LOCKED, RELAYER_DEPOSITED, RELAYER_FOR_SALE, RELAYER_RECONFIGURED,
    RELAYER_REFUNDED, RELAYER_REGISTERED, RELAYER_RESIGNED, RELAYER_SOLD, RELAYER_TRANSFERRED,
    RELAYER_UPDATED, RESIGN_LOCK_SECONDS, SALE_CANCELLED,
};

use storage::*;

/// Registry of trading relayers.
///
/// A coinbase moves through `Unregistered -> Active -> Closing -> removed`.
/// While a sale price is set the owner can only cancel the sale, and anyone
/// can buy the slot.
#[contract]
pub struct RelayerRegistry;

#[contractimpl]
impl RelayerRegistry {
    /// Initialize with the admin, the native asset and the token whitelist.
    pub fn init_contract(
        env: Env,
        admin: Address,
        native_token: Address,
        token_listing: Address,
        max_relayers: Option<u32>,
        max_token_list: Option<u32>,
        min_deposit: Option<i128>,
    ) -> Result<(), RegistryError> {
        if admin::has_admin(&env) {
            panic_with_error!(&env, RegistryError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = RelayerConfig {
            native_token,
            token_listing,
            max_relayers: max_relayers.unwrap_or(DEFAULT_MAX_RELAYERS),
            max_token_list: max_token_list.unwrap_or(DEFAULT_MAX_TOKEN_LIST),
            min_deposit: min_deposit.unwrap_or(DEFAULT_MIN_DEPOSIT),
        };
        check_limits(&config, 0)?;

        admin::set_admin(&env, &admin);
        set_config(&env, &config);
        set_coinbases(&env, &Vec::new(&env));
        set_active_count(&env, 0);
        bump_instance(&env);
        Ok(())
    }

    /* ---------------- ADMIN ---------------- */

    pub fn reconfigure(
        env: Env,
        admin: Address,
        max_relayers: u32,
        max_token_list: u32,
        min_deposit: i128,
    ) -> Result<(), RegistryError> {
        update_config(&env, &admin, |config| {
            config.max_relayers = max_relayers;
            config.max_token_list = max_token_list;
            config.min_deposit = min_deposit;
        })
    }

    /// Must stay at or above the number of active relayers.
    pub fn set_max_relayers(env: Env, admin: Address, max_relayers: u32) -> Result<(), RegistryError> {
        update_config(&env, &admin, |config| config.max_relayers = max_relayers)
    }

    pub fn set_max_token_list(
        env: Env,
        admin: Address,
        max_token_list: u32,
    ) -> Result<(), RegistryError> {
        update_config(&env, &admin, |config| config.max_token_list = max_token_list)
    }

    /// Applies to new registrations only; existing deposits are untouched.
    pub fn set_min_deposit(env: Env, admin: Address, min_deposit: i128) -> Result<(), RegistryError> {
        update_config(&env, &admin, |config| config.min_deposit = min_deposit)
    }

    pub fn transfer_admin(
        env: Env,
        admin: Address,
        new_admin: Address,
    ) -> Result<(), RegistryError> {
        admin::transfer_admin(&env, &admin, &new_admin)
    }

    /* ---------------- LIFECYCLE ---------------- */

    /// Register `coinbase` with a deposit of `amount` native units, paid by
    /// `caller`, who becomes the relayer's owner.
    pub fn register(
        env: Env,
        caller: Address,
        coinbase: Address,
        trade_fee: u32,
        from_tokens: Vec<Address>,
        to_tokens: Vec<Address>,
        amount: i128,
    ) -> Result<(), RegistryError> {
        caller.require_auth();

        let registry_admin = admin::get_admin(&env)?;
        let config = get_config(&env)?;

        if caller == registry_admin {
            return Err(RegistryError::CallerIsAdmin);
        }
        if caller == coinbase {
            return Err(RegistryError::CallerIsCoinbase);
        }
        if coinbase == registry_admin {
            return Err(RegistryError::CoinbaseIsAdmin);
        }
        if amount < config.min_deposit {
            return Err(RegistryError::DepositTooLow);
        }
        validate_trade_fee(trade_fee)?;
        validate_pair_count(&from_tokens, &to_tokens, config.max_token_list)?;
        if get_relayer(&env, &coinbase).is_some() {
            return Err(RegistryError::RelayerAlreadyRegistered);
        }
        if get_resign_request(&env, &coinbase).is_some() {
            return Err(RegistryError::RelayerClosing);
        }
        if get_active_count(&env) >= config.max_relayers {
            return Err(RegistryError::MaxRelayersReached);
        }
        check_pairs(&env, &config, &from_tokens, &to_tokens)?;

        pay_in(&env, &config.native_token, &caller, amount);

        let mut coinbases = get_coinbases(&env);
        let relayer = Relayer {
            index: coinbases.len(),
            owner: caller.clone(),
            deposit: amount,
            trade_fee,
            from_tokens,
            to_tokens,
        };
        coinbases.push_back(coinbase.clone());

        set_coinbases(&env, &coinbases);
        set_relayer(&env, &coinbase, &relayer);
        set_active_count(&env, get_active_count(&env) + 1);
        add_owned(&env, &caller);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, RELAYER_REGISTERED), coinbase),
            (caller, amount, trade_fee),
        );
        Ok(())
    }

    /// Replace the fee and the full pair list.
    pub fn update(
        env: Env,
        caller: Address,
        coinbase: Address,
        trade_fee: u32,
        from_tokens: Vec<Address>,
        to_tokens: Vec<Address>,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;
        let config = get_config(&env)?;

        validate_trade_fee(trade_fee)?;
        validate_pair_count(&from_tokens, &to_tokens, config.max_token_list)?;
        check_pairs(&env, &config, &from_tokens, &to_tokens)?;

        relayer.trade_fee = trade_fee;
        relayer.from_tokens = from_tokens;
        relayer.to_tokens = to_tokens;
        set_relayer(&env, &coinbase, &relayer);

        publish_updated(&env, &coinbase, &relayer);
        Ok(())
    }

    pub fn update_fee(
        env: Env,
        caller: Address,
        coinbase: Address,
        trade_fee: u32,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;
        validate_trade_fee(trade_fee)?;

        relayer.trade_fee = trade_fee;
        set_relayer(&env, &coinbase, &relayer);

        publish_updated(&env, &coinbase, &relayer);
        Ok(())
    }

    /// Append one trading pair.
    pub fn list_token(
        env: Env,
        caller: Address,
        coinbase: Address,
        from_token: Address,
        to_token: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;
        let config = get_config(&env)?;

        if relayer.from_tokens.len() >= config.max_token_list {
            return Err(RegistryError::TooManyPairs);
        }
        if pair_index(&relayer.from_tokens, &relayer.to_tokens, &from_token, &to_token).is_some() {
            return Err(RegistryError::PairAlreadyListed);
        }

        relayer.from_tokens.push_back(from_token);
        relayer.to_tokens.push_back(to_token);
        check_pairs(&env, &config, &relayer.from_tokens, &relayer.to_tokens)?;
        set_relayer(&env, &coinbase, &relayer);

        publish_updated(&env, &coinbase, &relayer);
        Ok(())
    }

    /// Remove one trading pair. The remaining pairs must still route to the
    /// native asset.
    pub fn delist_token(
        env: Env,
        caller: Address,
        coinbase: Address,
        from_token: Address,
        to_token: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;
        let config = get_config(&env)?;

        let index = pair_index(&relayer.from_tokens, &relayer.to_tokens, &from_token, &to_token)
            .ok_or(RegistryError::PairNotFound)?;
        relayer.from_tokens.remove(index);
        relayer.to_tokens.remove(index);
        validate_hub(&env, &config.native_token, &relayer.from_tokens, &relayer.to_tokens)?;
        set_relayer(&env, &coinbase, &relayer);

        publish_updated(&env, &coinbase, &relayer);
        Ok(())
    }

    /// Hand the relayer to an address that owns no other coinbase.
    pub fn transfer(
        env: Env,
        caller: Address,
        coinbase: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;

        if get_owned_count(&env, &new_owner) > 0 {
            return Err(RegistryError::OwnerAlreadyRegistered);
        }

        relayer.owner = new_owner.clone();
        set_relayer(&env, &coinbase, &relayer);
        remove_owned(&env, &caller);
        add_owned(&env, &new_owner);

        env.events().publish(
            (Symbol::new(&env, RELAYER_TRANSFERRED), coinbase),
            (caller, new_owner),
        );
        Ok(())
    }

    pub fn deposit_more(
        env: Env,
        caller: Address,
        coinbase: Address,
        amount: i128,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        let mut relayer = editable_relayer(&env, &coinbase, &caller)?;
        let config = get_config(&env)?;

        if amount < MIN_TOP_UP {
            return Err(RegistryError::TopUpTooLow);
        }
        relayer.deposit = relayer
            .deposit
            .checked_add(amount)
            .ok_or(RegistryError::InvalidAmount)?;

        pay_in(&env, &config.native_token, &caller, amount);
        set_relayer(&env, &coinbase, &relayer);

        env.events().publish(
            (Symbol::new(&env, RELAYER_DEPOSITED), coinbase),
            (amount, relayer.deposit),
        );
        Ok(())
    }

    /// Start the exit lock. The relayer stays stored, but no longer counts as
    /// active.
    pub fn resign(env: Env, caller: Address, coinbase: Address) -> Result<(), RegistryError> {
        caller.require_auth();
        let relayer = owned_relayer(&env, &coinbase, &caller)?;
        ensure_not_on_sale(&env, &coinbase)?;

        if relayer.deposit <= 0 {
            return Err(RegistryError::RelayerNotRegistered);
        }
        if get_resign_request(&env, &coinbase).is_some() {
            return Err(RegistryError::ResignAlreadyRequested);
        }

        let unlock_at = env.ledger().timestamp() + RESIGN_LOCK_SECONDS;
        set_resign_request(&env, &coinbase, unlock_at);
        set_active_count(&env, get_active_count(&env).saturating_sub(1));
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, RELAYER_RESIGNED), coinbase),
            unlock_at,
        );
        Ok(())
    }

    /// Pay the deposit back once the resign lock has elapsed.
    ///
    /// Before that, nothing changes and the remaining wait is returned.
    pub fn refund(
        env: Env,
        caller: Address,
        coinbase: Address,
    ) -> Result<RefundOutcome, RegistryError> {
        caller.require_auth();
        let relayer = owned_relayer(&env, &coinbase, &caller)?;
        ensure_not_on_sale(&env, &coinbase)?;
        let config = get_config(&env)?;

        let unlock_at = get_resign_request(&env, &coinbase).ok_or(RegistryError::NoResignRequest)?;
        let now = env.ledger().timestamp();
        if now < unlock_at {
            let remaining = unlock_at - now;
            log!(&env, "refund locked", coinbase, remaining);
            env.events().publish(
                (Symbol::new(&env, REFUND_LOCKED), coinbase),
                (remaining, relayer.deposit),
            );
            return Ok(RefundOutcome::Locked(remaining));
        }

        remove_relayer(&env, &coinbase);
        remove_resign_request(&env, &coinbase);
        swap_remove_coinbase(&env, &coinbase, relayer.index);
        remove_owned(&env, &relayer.owner);
        bump_instance(&env);

        token::Client::new(&env, &config.native_token).transfer(
            &env.current_contract_address(),
            &relayer.owner,
            &relayer.deposit,
        );

        env.events().publish(
            (Symbol::new(&env, RELAYER_REFUNDED), coinbase),
            (relayer.owner, relayer.deposit),
        );
        Ok(RefundOutcome::Refunded(relayer.deposit))
    }

    /* ---------------- MARKETPLACE ---------------- */

    /// List the relayer slot for sale, or change the asking price.
    pub fn sell_relayer(
        env: Env,
        caller: Address,
        coinbase: Address,
        price: i128,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        owned_relayer(&env, &coinbase, &caller)?;
        ensure_active(&env, &coinbase)?;

        if price <= 0 {
            return Err(RegistryError::InvalidPrice);
        }
        set_sale_price(&env, &coinbase, price);

        env.events().publish(
            (Symbol::new(&env, RELAYER_FOR_SALE), coinbase),
            (caller, price),
        );
        Ok(())
    }

    pub fn cancel_selling(
        env: Env,
        caller: Address,
        coinbase: Address,
    ) -> Result<(), RegistryError> {
        caller.require_auth();
        owned_relayer(&env, &coinbase, &caller)?;
        ensure_active(&env, &coinbase)?;

        if get_sale_price(&env, &coinbase).is_none() {
            return Err(RegistryError::RelayerNotOnSale);
        }
        remove_sale_price(&env, &coinbase);

        env.events()
            .publish((Symbol::new(&env, SALE_CANCELLED), coinbase), caller);
        Ok(())
    }

    /// Buy a listed relayer slot. `amount` must equal the asking price and
    /// goes straight to the seller.
    pub fn buy_relayer(
        env: Env,
        buyer: Address,
        coinbase: Address,
        amount: i128,
    ) -> Result<(), RegistryError> {
        buyer.require_auth();
        let mut relayer = get_relayer(&env, &coinbase).ok_or(RegistryError::RelayerNotRegistered)?;
        ensure_active(&env, &coinbase)?;
        let config = get_config(&env)?;

        let price = get_sale_price(&env, &coinbase).ok_or(RegistryError::RelayerNotOnSale)?;
        if amount != price {
            return Err(RegistryError::PriceMismatch);
        }
        if buyer == relayer.owner {
            return Err(RegistryError::BuyerIsOwner);
        }

        let seller = relayer.owner.clone();
        token::Client::new(&env, &config.native_token).transfer(&buyer, &seller, &price);

        relayer.owner = buyer.clone();
        set_relayer(&env, &coinbase, &relayer);
        remove_sale_price(&env, &coinbase);
        remove_owned(&env, &seller);
        add_owned(&env, &buyer);

        env.events().publish(
            (Symbol::new(&env, RELAYER_SOLD), coinbase),
            (seller, buyer, price),
        );
        Ok(())
    }

    /* ---------------- READS ---------------- */

    pub fn get_relayer(env: Env, coinbase: Address) -> Option<Relayer> {
        get_relayer(&env, &coinbase)
    }

    pub fn get_coinbases(env: Env) -> Vec<Address> {
        get_coinbases(&env)
    }

    pub fn relayer_count(env: Env) -> u32 {
        get_coinbases(&env).len()
    }

    pub fn active_relayer_count(env: Env) -> u32 {
        get_active_count(&env)
    }

    pub fn resign_request(env: Env, coinbase: Address) -> Option<u64> {
        get_resign_request(&env, &coinbase)
    }

    pub fn sale_price(env: Env, coinbase: Address) -> Option<i128> {
        get_sale_price(&env, &coinbase)
    }

    pub fn owner_of(env: Env, coinbase: Address) -> Option<Address> {
        get_relayer(&env, &coinbase).map(|relayer| relayer.owner)
    }

    pub fn is_closing(env: Env, coinbase: Address) -> bool {
        get_resign_request(&env, &coinbase).is_some()
    }

    pub fn get_config(env: Env) -> Result<RelayerConfig, RegistryError> {
        get_config(&env)
    }
}

/* ---------------- GUARDS ---------------- */

fn owned_relayer(env: &Env, coinbase: &Address, caller: &Address) -> Result<Relayer, RegistryError> {
    let relayer = get_relayer(env, coinbase).ok_or(RegistryError::RelayerNotRegistered)?;
    if &relayer.owner != caller {
        return Err(RegistryError::Unauthorized);
    }
    Ok(relayer)
}

fn ensure_active(env: &Env, coinbase: &Address) -> Result<(), RegistryError> {
    if get_resign_request(env, coinbase).is_some() {
        return Err(RegistryError::RelayerClosing);
    }
    Ok(())
}

fn ensure_not_on_sale(env: &Env, coinbase: &Address) -> Result<(), RegistryError> {
    if get_sale_price(env, coinbase).is_some() {
        return Err(RegistryError::RelayerOnSale);
    }
    Ok(())
}

/// Owner-only, active, not on sale.
fn editable_relayer(env: &Env, coinbase: &Address, caller: &Address) -> Result<Relayer, RegistryError> {
    let relayer = owned_relayer(env, coinbase, caller)?;
    ensure_active(env, coinbase)?;
    ensure_not_on_sale(env, coinbase)?;
    Ok(relayer)
}

/* ---------------- HELPERS ---------------- */

/// Admin-only edit of the limits, re-checked as a whole before storing.
fn update_config<F>(env: &Env, admin: &Address, change: F) -> Result<(), RegistryError>
where
    F: FnOnce(&mut RelayerConfig),
{
    admin.require_auth();
    admin::verify_admin(env, admin)?;

    let mut config = get_config(env)?;
    change(&mut config);
    check_limits(&config, get_active_count(env))?;

    set_config(env, &config);
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, RELAYER_RECONFIGURED),),
        (config.max_relayers, config.max_token_list, config.min_deposit),
    );
    Ok(())
}

fn check_limits(config: &RelayerConfig, active_count: u32) -> Result<(), RegistryError> {
    if config.max_relayers == 0 || config.max_relayers < active_count {
        return Err(RegistryError::InvalidConfiguration);
    }
    if config.max_token_list == 0 || config.max_token_list > MAX_TOKEN_LIST_CAP {
        return Err(RegistryError::InvalidConfiguration);
    }
    if config.min_deposit <= 0 {
        return Err(RegistryError::InvalidConfiguration);
    }
    Ok(())
}

/// Whitelist check on both legs of every pair, then the native hub rule.
fn check_pairs(
    env: &Env,
    config: &RelayerConfig,
    from_tokens: &Vec<Address>,
    to_tokens: &Vec<Address>,
) -> Result<(), RegistryError> {
    let listing = TokenListingPortClient::new(env, &config.token_listing);
    validate_pairs_listed(&config.native_token, from_tokens, to_tokens, |token| {
        listing.is_listed(token)
    })?;
    validate_hub(env, &config.native_token, from_tokens, to_tokens)
}

fn pay_in(env: &Env, native_token: &Address, from: &Address, amount: i128) {
    token::Client::new(env, native_token).transfer(from, &env.current_contract_address(), &amount);
}

/// Move the last coinbase into the freed slot and shrink the array.
fn swap_remove_coinbase(env: &Env, coinbase: &Address, index: u32) {
    let mut coinbases = get_coinbases(env);
    if let Some(last) = coinbases.pop_back() {
        if &last != coinbase {
            coinbases.set(index, last.clone());
            if let Some(mut moved) = get_relayer(env, &last) {
                moved.index = index;
                set_relayer(env, &last, &moved);
            }
        }
    }
    set_coinbases(env, &coinbases);
}

fn publish_updated(env: &Env, coinbase: &Address, relayer: &Relayer) {
    env.events().publish(
        (Symbol::new(env, RELAYER_UPDATED), coinbase.clone()),
        (relayer.trade_fee, relayer.from_tokens.clone(), relayer.to_tokens.clone()),
    );
}
