#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address};
use xdcx_lib::{RegistryError, MIN_TOP_UP, NATIVE_UNIT};

use crate::test::{Setup, DEPOSIT};

const PRICE: i128 = 30_000 * NATIVE_UNIT;

#[test]
fn test_sell_and_cancel() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);

    assert_eq!(
        s.client.try_sell_relayer(&owner, &coinbase, &0),
        Err(Ok(RegistryError::InvalidPrice))
    );
    assert_eq!(
        s.client.try_cancel_selling(&owner, &coinbase),
        Err(Ok(RegistryError::RelayerNotOnSale))
    );

    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.client.try_sell_relayer(&stranger, &coinbase, &PRICE),
        Err(Ok(RegistryError::Unauthorized))
    );

    s.client.sell_relayer(&owner, &coinbase, &PRICE);
    assert_eq!(s.client.sale_price(&coinbase), Some(PRICE));
    assert_eq!(
        s.client.try_cancel_selling(&stranger, &coinbase),
        Err(Ok(RegistryError::Unauthorized))
    );

    // relisting overwrites the price
    s.client.sell_relayer(&owner, &coinbase, &(PRICE * 2));
    assert_eq!(s.client.sale_price(&coinbase), Some(PRICE * 2));

    s.client.cancel_selling(&owner, &coinbase);
    assert_eq!(s.client.sale_price(&coinbase), None);
    s.client.update_fee(&owner, &coinbase, &20);
}

#[test]
fn test_on_sale_blocks_owner_operations() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT + MIN_TOP_UP);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);
    let (from, to) = s.pairs(&[(&s.native, &token)]);

    s.client.sell_relayer(&owner, &coinbase, &PRICE);

    assert_eq!(
        s.client.try_update(&owner, &coinbase, &10, &from, &to),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_update_fee(&owner, &coinbase, &10),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_list_token(&owner, &coinbase, &s.native, &s.listed_token()),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_delist_token(&owner, &coinbase, &s.native, &token),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_transfer(&owner, &coinbase, &Address::generate(&s.env)),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_deposit_more(&owner, &coinbase, &MIN_TOP_UP),
        Err(Ok(RegistryError::RelayerOnSale))
    );
    assert_eq!(
        s.client.try_resign(&owner, &coinbase),
        Err(Ok(RegistryError::RelayerOnSale))
    );
}

#[test]
fn test_closing_relayer_cannot_be_listed() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);

    s.client.resign(&owner, &coinbase);
    assert_eq!(
        s.client.try_sell_relayer(&owner, &coinbase, &PRICE),
        Err(Ok(RegistryError::RelayerClosing))
    );
}

#[test]
fn test_buy_with_wrong_amount_changes_nothing() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let buyer = s.account(PRICE * 2);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);
    s.client.sell_relayer(&owner, &coinbase, &PRICE);

    assert_eq!(
        s.client.try_buy_relayer(&buyer, &coinbase, &(PRICE - 1)),
        Err(Ok(RegistryError::PriceMismatch))
    );
    assert_eq!(
        s.client.try_buy_relayer(&buyer, &coinbase, &(PRICE + 1)),
        Err(Ok(RegistryError::PriceMismatch))
    );
    assert_eq!(
        s.client.try_buy_relayer(&owner, &coinbase, &PRICE),
        Err(Ok(RegistryError::BuyerIsOwner))
    );

    assert_eq!(s.client.owner_of(&coinbase), Some(owner.clone()));
    assert_eq!(s.client.sale_price(&coinbase), Some(PRICE));
    assert_eq!(s.token.balance(&buyer), PRICE * 2);
}

#[test]
fn test_buy_unlisted_relayer_fails() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let buyer = s.account(PRICE);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);

    assert_eq!(
        s.client.try_buy_relayer(&buyer, &coinbase, &PRICE),
        Err(Ok(RegistryError::RelayerNotOnSale))
    );
    assert_eq!(
        s.client.try_buy_relayer(&buyer, &Address::generate(&s.env), &PRICE),
        Err(Ok(RegistryError::RelayerNotRegistered))
    );
}

#[test]
fn test_buy_transfers_ownership_and_pays_seller() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let buyer = s.account(PRICE);
    let late_buyer = s.account(PRICE);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);
    let before = s.client.get_relayer(&coinbase).unwrap();

    s.client.sell_relayer(&owner, &coinbase, &PRICE);
    s.client.buy_relayer(&buyer, &coinbase, &PRICE);

    let after = s.client.get_relayer(&coinbase).unwrap();
    assert_eq!(after.owner, buyer);
    assert_eq!(after.deposit, before.deposit);
    assert_eq!(after.trade_fee, before.trade_fee);
    assert_eq!(after.from_tokens, before.from_tokens);
    assert_eq!(after.index, before.index);
    assert_eq!(s.client.sale_price(&coinbase), None);

    assert_eq!(s.token.balance(&owner), PRICE);
    assert_eq!(s.token.balance(&buyer), 0);
    assert_eq!(s.token.balance(&s.client.address), DEPOSIT);

    // the listing is gone for anyone arriving second
    assert_eq!(
        s.client.try_buy_relayer(&late_buyer, &coinbase, &PRICE),
        Err(Ok(RegistryError::RelayerNotOnSale))
    );

    // old owner is locked out, new owner is in
    assert_eq!(
        s.client.try_update_fee(&owner, &coinbase, &1),
        Err(Ok(RegistryError::Unauthorized))
    );
    assert_eq!(
        s.client.try_resign(&owner, &coinbase),
        Err(Ok(RegistryError::Unauthorized))
    );
    s.client.update_fee(&buyer, &coinbase, &1);
    s.client.resign(&buyer, &coinbase);
}

#[test]
fn test_bought_relayer_refunds_to_new_owner() {
    let s = Setup::new();
    let owner = s.account(DEPOSIT);
    let buyer = s.account(PRICE);
    let token = s.listed_token();
    let coinbase = s.register(&owner, &token);

    s.client.sell_relayer(&owner, &coinbase, &PRICE);
    s.client.buy_relayer(&buyer, &coinbase, &PRICE);
    s.client.resign(&buyer, &coinbase);
    s.advance(xdcx_lib::RESIGN_LOCK_SECONDS);
    s.client.refund(&buyer, &coinbase);

    assert_eq!(s.token.balance(&buyer), DEPOSIT);
    assert_eq!(s.token.balance(&owner), PRICE);
}
