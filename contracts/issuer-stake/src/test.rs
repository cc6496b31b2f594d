#![cfg(test)]

use soroban_sdk::{testutils::Address as _, token, vec, Address, Env};
use xdcx_lib::{testutils::MockIssuedToken, RegistryError, DEFAULT_MIN_CAP, NATIVE_UNIT};

use crate::{IssuerStake, IssuerStakeClient};

const CAP: i128 = 10 * NATIVE_UNIT;

struct Setup<'a> {
    env: Env,
    client: IssuerStakeClient<'a>,
    token: token::Client<'a>,
    admin: Address,
    native: Address,
}

impl<'a> Setup<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let native = env
            .register_stellar_asset_contract_v2(admin.clone())
            .address();
        let contract_id = env.register(IssuerStake, ());
        let client = IssuerStakeClient::new(&env, &contract_id);
        client.init_contract(&admin, &native, &None);

        Setup {
            client,
            token: token::Client::new(&env, &native),
            admin,
            native,
            env,
        }
    }

    fn account(&self, balance: i128) -> Address {
        let account = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.native).mint(&account, &balance);
        account
    }

    fn issued_token(&self, issuer: &Address) -> Address {
        self.env.register(MockIssuedToken, (issuer.clone(),))
    }
}

#[test]
fn test_init_and_min_cap() {
    let s = Setup::new();
    assert_eq!(s.client.min_cap(), DEFAULT_MIN_CAP);
    assert_eq!(
        s.client.try_init_contract(&s.admin, &s.native, &None),
        Err(Ok(RegistryError::AlreadyInitialized))
    );

    s.client.set_min_cap(&s.admin, &(CAP * 2));
    assert_eq!(s.client.min_cap(), CAP * 2);
    assert_eq!(
        s.client.try_set_min_cap(&s.admin, &0),
        Err(Ok(RegistryError::InvalidConfiguration))
    );
    assert_eq!(
        s.client.try_set_min_cap(&Address::generate(&s.env), &CAP),
        Err(Ok(RegistryError::Unauthorized))
    );
}

#[test]
fn test_transfer_admin() {
    let s = Setup::new();
    let next = Address::generate(&s.env);
    s.client.transfer_admin(&s.admin, &next);

    assert_eq!(
        s.client.try_set_min_cap(&s.admin, &CAP),
        Err(Ok(RegistryError::Unauthorized))
    );
    s.client.set_min_cap(&next, &CAP);
}

#[test]
fn test_apply_accumulates() {
    let s = Setup::new();
    let issuer = s.account(CAP * 3);
    let trc = s.issued_token(&issuer);

    s.client.apply(&issuer, &trc, &CAP);
    s.client.apply(&issuer, &trc, &(CAP * 2));

    assert_eq!(s.client.get_token_capacity(&trc), CAP * 3);
    assert_eq!(s.client.get_tokens(), vec![&s.env, trc]);
    assert_eq!(s.token.balance(&s.client.address), CAP * 3);
    assert_eq!(s.token.balance(&issuer), 0);
}

#[test]
fn test_apply_rejections() {
    let s = Setup::new();
    let issuer = s.account(CAP);
    let stranger = s.account(CAP);
    let trc = s.issued_token(&issuer);

    assert_eq!(
        s.client.try_apply(&stranger, &trc, &CAP),
        Err(Ok(RegistryError::NotTokenIssuer))
    );
    assert_eq!(
        s.client.try_apply(&issuer, &trc, &(CAP - 1)),
        Err(Ok(RegistryError::CapacityTooLow))
    );
    assert_eq!(s.client.get_token_capacity(&trc), 0);
    assert_eq!(s.client.get_tokens().len(), 0);
    assert_eq!(s.token.balance(&issuer), CAP);
}

#[test]
fn test_charge_by_anyone() {
    let s = Setup::new();
    let issuer = s.account(CAP);
    let supporter = s.account(CAP);
    let trc = s.issued_token(&issuer);

    assert_eq!(
        s.client.try_charge(&supporter, &trc, &1),
        Err(Ok(RegistryError::TokenNotApplied))
    );

    s.client.apply(&issuer, &trc, &CAP);
    s.client.charge(&supporter, &trc, &1);
    s.client.charge(&supporter, &trc, &(CAP - 1));
    assert_eq!(s.client.get_token_capacity(&trc), CAP * 2);
    assert_eq!(s.client.get_tokens().len(), 1);

    assert_eq!(
        s.client.try_charge(&supporter, &trc, &0),
        Err(Ok(RegistryError::InvalidAmount))
    );
}

#[test]
fn test_charge_cost_does_not_grow_with_applied_tokens() {
    let s = Setup::new();
    let issuer = s.account(CAP * 41);
    let supporter = s.account(2);
    let first = s.issued_token(&issuer);
    s.client.apply(&issuer, &first, &CAP);

    let mut budget = s.env.cost_estimate().budget();
    budget.reset_default();
    s.client.charge(&supporter, &first, &1);
    let small = budget.cpu_instruction_cost();

    for _ in 0..40 {
        let trc = s.issued_token(&issuer);
        s.client.apply(&issuer, &trc, &CAP);
    }

    budget.reset_default();
    s.client.charge(&supporter, &first, &1);
    let large = budget.cpu_instruction_cost();

    assert!(large <= small + small / 10, "{} -> {}", small, large);
    assert_eq!(s.client.get_tokens().len(), 41);
    assert_eq!(s.client.get_token_capacity(&first), CAP + 2);
}
