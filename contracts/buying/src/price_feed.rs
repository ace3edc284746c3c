use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Latest quote of the payment token in USD.
///
/// The USD value of one whole token is `rate / 10^decimals`.
#[contracttype]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RateData {
    pub rate: i128,
    pub decimals: u32,
}

/// Read interface the ledger expects from its price feed contract.
#[allow(dead_code)]
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Current exchange rate together with its decimal scale.
    fn latest_rate(e: Env) -> RateData;
}

/// Helper for calling the configured price feed.
pub struct PriceFeedHelper;

impl PriceFeedHelper {
    /// Fetches the latest rate.
    ///
    /// Returns `None` when the feed contract is missing, traps, or answers
    /// with a value that cannot be decoded as [`RateData`].
    pub fn latest_rate(e: &Env, feed_address: &Address) -> Option<RateData> {
        let client = PriceFeedClient::new(e, feed_address);
        match client.try_latest_rate() {
            Ok(Ok(rate)) => Some(rate),
            _ => None,
        }
    }
}
