use soroban_sdk::{Address, Env, String, Vec};

use crate::types::{LedgerConfig, StorageKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD};

pub fn get_config(e: &Env) -> Option<LedgerConfig> {
    e.storage()
        .instance()
        .get::<_, LedgerConfig>(&StorageKey::Config)
}

pub fn set_config(e: &Env, config: &LedgerConfig) {
    e.storage().instance().set(&StorageKey::Config, config);
}

pub fn get_funds_balance(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get::<_, i128>(&StorageKey::FundsBalance)
        .unwrap_or(0)
}

pub fn set_funds_balance(e: &Env, balance: i128) {
    e.storage()
        .instance()
        .set(&StorageKey::FundsBalance, &balance);
}

// ============================================================================
// Catalog
// ============================================================================

pub fn get_item_names(e: &Env) -> Vec<String> {
    let key = StorageKey::ItemNames;
    let names = e
        .storage()
        .persistent()
        .get::<_, Vec<String>>(&key)
        .unwrap_or(Vec::new(e));
    if !names.is_empty() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    names
}

fn set_item_names(e: &Env, names: &Vec<String>) {
    let key = StorageKey::ItemNames;
    e.storage().persistent().set(&key, names);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Price in USD-wei, or 0 when the item is not listed.
pub fn get_item_price(e: &Env, name: &String) -> i128 {
    let key = StorageKey::ItemPrice(name.clone());
    let price = e.storage().persistent().get::<_, i128>(&key);
    match price {
        Some(price) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
            price
        }
        None => 0,
    }
}

pub fn item_exists(e: &Env, name: &String) -> bool {
    e.storage()
        .persistent()
        .has(&StorageKey::ItemPrice(name.clone()))
}

/// Writes the price and appends the name on first listing. A relisted
/// name keeps its position in the sequence.
pub fn put_item(e: &Env, name: &String, price: i128) {
    if !item_exists(e, name) {
        let mut names = get_item_names(e);
        names.push_back(name.clone());
        set_item_names(e, &names);
    }

    let key = StorageKey::ItemPrice(name.clone());
    e.storage().persistent().set(&key, &price);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

/// Drops the price entry and the name. Surviving names keep their order.
/// Returns false if the item was not listed.
pub fn remove_item(e: &Env, name: &String) -> bool {
    if !item_exists(e, name) {
        return false;
    }

    e.storage()
        .persistent()
        .remove(&StorageKey::ItemPrice(name.clone()));

    let mut names = get_item_names(e);
    if let Some(index) = names.first_index_of(name) {
        names.remove(index);
        set_item_names(e, &names);
    }
    true
}

// ============================================================================
// Buyer ledger
// ============================================================================

pub fn get_amount_paid(e: &Env, buyer: &Address) -> i128 {
    let key = StorageKey::AmountPaid(buyer.clone());
    let paid = e.storage().persistent().get::<_, i128>(&key).unwrap_or(0);
    if paid > 0 {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    paid
}

pub fn set_amount_paid(e: &Env, buyer: &Address, amount: i128) {
    let key = StorageKey::AmountPaid(buyer.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
