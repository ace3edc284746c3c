#![no_std]

mod errors;
mod events;
mod oracle;
mod price_feed;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String, Vec};

pub use crate::errors::Error;
use crate::events::*;
use crate::oracle::OracleService;
pub use crate::price_feed::{PriceFeedClient, RateData};
use crate::storage::*;
pub use crate::types::LedgerConfig;
use crate::types::{DAY_IN_LEDGERS, USD_WEI};

// ============================================================================
// Constants
// ============================================================================

/// TTL extension amount for instance storage (30 days)
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

// ============================================================================
// Contract
// ============================================================================

/// Buying Ledger Smart Contract
///
/// A single-owner catalog priced in USD and paid for in the payment token:
/// - Item listing, relisting and removal
/// - USD valuation of payments through an external price feed
/// - Per-buyer spend accounting
/// - Owner-only withdrawal of collected funds
#[contract]
pub struct BuyingLedger;

#[contractimpl]
impl BuyingLedger {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Deploy the ledger.
    ///
    /// # Arguments
    /// * `owner` - Identity allowed to withdraw; fixed for the contract's lifetime
    /// * `price_feed` - Contract quoting the payment token in USD
    /// * `payment_token` - Token buyers pay with (the native asset contract on a live network)
    pub fn __constructor(e: &Env, owner: Address, price_feed: Address, payment_token: Address) {
        let token_decimals = token::Client::new(e, &payment_token).decimals();

        let config = LedgerConfig {
            owner: owner.clone(),
            price_feed: price_feed.clone(),
            payment_token: payment_token.clone(),
            token_decimals,
            created_at: e.ledger().timestamp(),
        };

        set_config(e, &config);
        set_funds_balance(e, 0);
        Self::extend_instance_ttl(e);

        LedgerCreatedEventData {
            owner,
            price_feed,
            payment_token,
        }
        .publish(e);
    }

    // ========================================================================
    // CATALOG
    // ========================================================================

    /// List an item, or overwrite the price of an already listed one.
    ///
    /// # Arguments
    /// * `caller` - Address listing the item; any signer may list
    /// * `name` - Item name
    /// * `price_usd` - Price in whole USD, stored as `price_usd * 10^18`
    ///
    /// # Errors
    /// * `Error::EmptyName` - If `name` is empty
    /// * `Error::InvalidAmount` - If `price_usd` is zero or negative
    pub fn add_item_to_list(
        e: &Env,
        caller: Address,
        name: String,
        price_usd: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        if price_usd <= 0 {
            log!(e, "rejected listing price: {}", price_usd);
            return Err(Error::InvalidAmount);
        }

        let price = price_usd
            .checked_mul(USD_WEI)
            .ok_or(Error::ArithmeticOverflow)?;

        let relisted = item_exists(e, &name);
        put_item(e, &name, price);

        ItemListedEventData {
            name,
            lister: caller,
            price,
            relisted,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Remove a listed item together with its price.
    ///
    /// # Errors
    /// * `Error::EmptyName` - If `name` is empty
    /// * `Error::ItemNotFound` - If `name` is not listed
    pub fn remove_an_item(e: &Env, caller: Address, name: String) -> Result<(), Error> {
        caller.require_auth();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        if !remove_item(e, &name) {
            return Err(Error::ItemNotFound);
        }

        ItemRemovedEventData {
            name,
            removed_by: caller,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // PURCHASE
    // ========================================================================

    /// Buy a listed item by paying `amount` of the payment token.
    ///
    /// The payment is valued in USD through the price feed and must cover the
    /// item's price. On success the amount moves from `buyer` to the contract,
    /// is credited to the buyer's ledger entry, and the item is delisted.
    ///
    /// # Errors
    /// * `Error::EmptyName` - If `name` is empty
    /// * `Error::AmountRequired` - If `amount` is zero or negative
    /// * `Error::ItemNotFound` - If `name` is not listed
    /// * `Error::PriceFeedUnavailable` - If the price feed cannot be read
    /// * `Error::InvalidPriceFeedRate` - If the price feed quotes a non-positive rate
    /// * `Error::InsufficientPayment` - If `amount` is worth less than the price
    pub fn buy(e: &Env, buyer: Address, name: String, amount: i128) -> Result<(), Error> {
        buyer.require_auth();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        if amount <= 0 {
            return Err(Error::AmountRequired);
        }

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if !item_exists(e, &name) {
            return Err(Error::ItemNotFound);
        }
        let price = get_item_price(e, &name);

        let usd_value = OracleService::get_conversion_rate(
            e,
            &config.price_feed,
            amount,
            config.token_decimals,
        )?;
        if let Err(err) = OracleService::ensure_covers(usd_value, price) {
            log!(e, "payment below item price: {}", name);
            return Err(err);
        }

        let funds = get_funds_balance(e)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let paid = get_amount_paid(e, &buyer)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        token::Client::new(e, &config.payment_token).transfer(
            &buyer,
            &e.current_contract_address(),
            &amount,
        );

        set_funds_balance(e, funds);
        set_amount_paid(e, &buyer, paid);
        remove_item(e, &name);

        ItemPurchasedEventData {
            buyer,
            name,
            amount,
            usd_value,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // FUNDS
    // ========================================================================

    /// Send the whole funds balance to the owner (owner only).
    ///
    /// The balance is zeroed before the token transfer runs. A failed transfer
    /// reverts the invocation, restoring the balance.
    ///
    /// # Returns
    /// * Amount paid out
    ///
    /// # Errors
    /// * `Error::NotAuthorized` - If `caller` is not the owner
    pub fn withdraw(e: &Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if caller != config.owner {
            log!(e, "withdraw refused for {}", caller);
            return Err(Error::NotAuthorized);
        }

        let amount = get_funds_balance(e);
        set_funds_balance(e, 0);

        if amount > 0 {
            token::Client::new(e, &config.payment_token).transfer(
                &e.current_contract_address(),
                &config.owner,
                &amount,
            );
        }

        FundsWithdrawnEventData {
            owner: config.owner,
            amount,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(amount)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Get ledger configuration
    pub fn get_config(e: &Env) -> Result<LedgerConfig, Error> {
        get_config(e).ok_or(Error::NotInitialized)
    }

    /// Identity allowed to withdraw.
    pub fn get_owner_address(e: &Env) -> Result<Address, Error> {
        let config = get_config(e).ok_or(Error::NotInitialized)?;
        Ok(config.owner)
    }

    /// Price feed contract used to value payments.
    pub fn get_price_feed(e: &Env) -> Result<Address, Error> {
        let config = get_config(e).ok_or(Error::NotInitialized)?;
        Ok(config.price_feed)
    }

    /// Token buyers pay with.
    pub fn get_payment_token(e: &Env) -> Result<Address, Error> {
        let config = get_config(e).ok_or(Error::NotInitialized)?;
        Ok(config.payment_token)
    }

    /// Price of `name` in USD-wei, or 0 if it is not listed.
    pub fn get_price_of_item(e: &Env, name: String) -> i128 {
        get_item_price(e, &name)
    }

    /// Names of listed items in listing order.
    pub fn get_listed_items(e: &Env) -> Vec<String> {
        get_item_names(e)
    }

    /// Listed items as parallel name and whole-USD price sequences.
    pub fn get_items(e: &Env) -> (Vec<String>, Vec<i128>) {
        let names = get_item_names(e);
        let mut prices: Vec<i128> = Vec::new(e);

        for name in names.iter() {
            prices.push_back(get_item_price(e, &name) / USD_WEI);
        }

        (names, prices)
    }

    /// Total amount `buyer` has paid across all purchases.
    pub fn get_people_who_bought(e: &Env, buyer: Address) -> i128 {
        get_amount_paid(e, &buyer)
    }

    /// Payment-token amount currently held for the owner.
    pub fn get_funds_balance(e: &Env) -> i128 {
        get_funds_balance(e)
    }

    /// USD-wei value of `amount` of the payment token at the current feed rate.
    pub fn get_usd_value(e: &Env, amount: i128) -> Result<i128, Error> {
        let config = get_config(e).ok_or(Error::NotInitialized)?;
        OracleService::get_conversion_rate(e, &config.price_feed, amount, config.token_decimals)
    }

    // ========================================================================
    // INTERNAL HELPERS
    // ========================================================================

    /// Extend the TTL of instance storage.
    /// Called internally during state-changing operations.
    fn extend_instance_ttl(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}
