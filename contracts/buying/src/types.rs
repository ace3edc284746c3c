use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Config,
    FundsBalance,
    ItemNames,
    ItemPrice(String),
    AmountPaid(Address),
}

/// Settings fixed when the ledger is deployed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Sole identity allowed to withdraw funds. Never changes.
    pub owner: Address,
    /// Price feed quoting the payment token in USD.
    pub price_feed: Address,
    /// Token buyers pay with.
    pub payment_token: Address,
    /// Decimal places of `payment_token`, read once at construction.
    pub token_decimals: u32,
    pub created_at: u64,
}

/// Catalog prices are stored as whole USD scaled by this factor ("USD-wei").
pub const USD_WEI: i128 = 1_000_000_000_000_000_000;

/// Decimal places of a USD-wei amount.
pub const USD_WEI_DECIMALS: u32 = 18;

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
