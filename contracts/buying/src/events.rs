use soroban_sdk::{contractevent, Address, String};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerCreatedEventData {
    #[topic]
    pub owner: Address,
    pub price_feed: Address,
    pub payment_token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemListedEventData {
    #[topic]
    pub name: String,
    pub lister: Address,
    pub price: i128,
    pub relisted: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRemovedEventData {
    #[topic]
    pub name: String,
    pub removed_by: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemPurchasedEventData {
    #[topic]
    pub buyer: Address,
    #[topic]
    pub name: String,
    pub amount: i128,
    pub usd_value: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawnEventData {
    #[topic]
    pub owner: Address,
    pub amount: i128,
}
