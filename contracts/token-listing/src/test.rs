#![cfg(test)]

use soroban_sdk::{testutils::Address as _, token, vec, Address, Env};
use xdcx_lib::{RegistryError, DEFAULT_LISTING_FEE, NATIVE_UNIT};

use crate::{TokenListing, TokenListingClient};

const FEE: i128 = 100 * NATIVE_UNIT;

struct Setup<'a> {
    env: Env,
    client: TokenListingClient<'a>,
    token: token::Client<'a>,
    admin: Address,
    native: Address,
    foundation: Address,
}

impl<'a> Setup<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let foundation = Address::generate(&env);
        let native = env
            .register_stellar_asset_contract_v2(admin.clone())
            .address();
        let contract_id = env.register(TokenListing, ());
        let client = TokenListingClient::new(&env, &contract_id);
        client.init_contract(&admin, &native, &foundation, &None);

        Setup {
            client,
            token: token::Client::new(&env, &native),
            admin,
            native,
            foundation,
            env,
        }
    }

    fn account(&self, balance: i128) -> Address {
        let account = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.native).mint(&account, &balance);
        account
    }
}

#[test]
fn test_init() {
    let s = Setup::new();
    assert_eq!(s.client.listing_fee(), DEFAULT_LISTING_FEE);
    assert_eq!(s.client.foundation(), s.foundation);
    assert_eq!(s.client.get_tokens().len(), 0);

    let result = s
        .client
        .try_init_contract(&s.admin, &s.native, &s.foundation, &Some(1));
    assert_eq!(result, Err(Ok(RegistryError::AlreadyInitialized)));
}

#[test]
fn test_init_rejects_non_positive_fee() {
    let env = Env::default();
    env.mock_all_auths();
    let client = TokenListingClient::new(&env, &env.register(TokenListing, ()));
    let result = client.try_init_contract(
        &Address::generate(&env),
        &Address::generate(&env),
        &Address::generate(&env),
        &Some(0),
    );
    assert_eq!(result, Err(Ok(RegistryError::InvalidConfiguration)));
}

#[test]
fn test_list_token_pays_foundation() {
    let s = Setup::new();
    let issuer = s.account(FEE * 2);
    let usdt = Address::generate(&s.env);
    let btc = Address::generate(&s.env);

    assert!(!s.client.is_listed(&usdt));
    s.client.list_token(&issuer, &usdt, &FEE);
    s.client.list_token(&issuer, &btc, &FEE);

    assert!(s.client.is_listed(&usdt));
    assert!(s.client.is_listed(&btc));
    assert_eq!(s.client.get_tokens(), vec![&s.env, usdt, btc]);
    assert_eq!(s.token.balance(&s.foundation), FEE * 2);
    assert_eq!(s.token.balance(&issuer), 0);
    assert_eq!(s.token.balance(&s.client.address), 0);
}

#[test]
fn test_list_token_rejections() {
    let s = Setup::new();
    let issuer = s.account(FEE * 3);
    let usdt = Address::generate(&s.env);

    assert_eq!(
        s.client.try_list_token(&issuer, &usdt, &(FEE - 1)),
        Err(Ok(RegistryError::ListingFeeMismatch))
    );
    assert_eq!(
        s.client.try_list_token(&issuer, &usdt, &(FEE + 1)),
        Err(Ok(RegistryError::ListingFeeMismatch))
    );
    assert_eq!(
        s.client.try_list_token(&issuer, &s.native, &FEE),
        Err(Ok(RegistryError::NativeTokenImplicit))
    );

    s.client.list_token(&issuer, &usdt, &FEE);
    assert_eq!(
        s.client.try_list_token(&issuer, &usdt, &FEE),
        Err(Ok(RegistryError::TokenAlreadyListed))
    );

    assert_eq!(s.client.get_tokens().len(), 1);
    assert_eq!(s.token.balance(&issuer), FEE * 2);
    // the native asset is implicit, never stored
    assert!(!s.client.is_listed(&s.native));
}

#[test]
fn test_is_listed_cost_does_not_grow_with_whitelist() {
    let s = Setup::new();
    let issuer = s.account(FEE * 101);
    let unlisted = Address::generate(&s.env);
    s.client.list_token(&issuer, &Address::generate(&s.env), &FEE);

    let mut budget = s.env.cost_estimate().budget();
    budget.reset_default();
    assert!(!s.client.is_listed(&unlisted));
    let small = budget.cpu_instruction_cost();

    for _ in 0..100 {
        s.client.list_token(&issuer, &Address::generate(&s.env), &FEE);
    }

    budget.reset_default();
    assert!(!s.client.is_listed(&unlisted));
    let large = budget.cpu_instruction_cost();

    assert!(large <= small + small / 10, "{} -> {}", small, large);
    assert_eq!(s.client.get_tokens().len(), 101);
}
