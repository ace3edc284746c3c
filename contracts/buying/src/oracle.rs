use soroban_sdk::{log, Address, Env};

use crate::errors::Error;
use crate::price_feed::{PriceFeedHelper, RateData};
use crate::types::USD_WEI_DECIMALS;

/// Converts payment-token amounts into USD-wei using the price feed.
pub struct OracleService;

impl OracleService {
    /// USD-wei value of `amount` (with `token_decimals` places) at the quoted
    /// rate, truncating.
    ///
    /// The amount is multiplied by the rate first and the combined decimal
    /// places are adjusted to 18 in a single step.
    ///
    /// # Errors
    /// * `Error::InvalidPriceFeedRate` - If the rate is zero or negative
    /// * `Error::ArithmeticOverflow` - If an intermediate value overflows
    pub fn usd_value(
        amount: i128,
        token_decimals: u32,
        rate_data: &RateData,
    ) -> Result<i128, Error> {
        if rate_data.rate <= 0 {
            return Err(Error::InvalidPriceFeedRate);
        }

        let value = amount
            .checked_mul(rate_data.rate)
            .ok_or(Error::ArithmeticOverflow)?;
        let places = token_decimals
            .checked_add(rate_data.decimals)
            .ok_or(Error::ArithmeticOverflow)?;

        if places <= USD_WEI_DECIMALS {
            let factor = Self::pow10(USD_WEI_DECIMALS - places)?;
            value.checked_mul(factor).ok_or(Error::ArithmeticOverflow)
        } else {
            let factor = Self::pow10(places - USD_WEI_DECIMALS)?;
            value.checked_div(factor).ok_or(Error::ArithmeticOverflow)
        }
    }

    /// Queries the feed and values `amount` of the payment token in USD-wei.
    ///
    /// # Errors
    /// * `Error::PriceFeedUnavailable` - If the feed call fails
    /// * `Error::InvalidPriceFeedRate` - If the feed quotes a non-positive rate
    /// * `Error::ArithmeticOverflow` - If the conversion overflows
    pub fn get_conversion_rate(
        e: &Env,
        price_feed: &Address,
        amount: i128,
        token_decimals: u32,
    ) -> Result<i128, Error> {
        let rate_data = match PriceFeedHelper::latest_rate(e, price_feed) {
            Some(rate_data) => rate_data,
            None => {
                log!(e, "price feed read failed: {}", price_feed.clone());
                return Err(Error::PriceFeedUnavailable);
            }
        };

        Self::usd_value(amount, token_decimals, &rate_data)
    }

    /// Fails with `InsufficientPayment` when `paid_usd` is below `price_usd`.
    pub fn ensure_covers(paid_usd: i128, price_usd: i128) -> Result<(), Error> {
        if paid_usd < price_usd {
            return Err(Error::InsufficientPayment);
        }
        Ok(())
    }

    fn pow10(exp: u32) -> Result<i128, Error> {
        10i128.checked_pow(exp).ok_or(Error::ArithmeticOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::USD_WEI;

    fn rate(rate: i128, decimals: u32) -> RateData {
        RateData { rate, decimals }
    }

    #[test]
    fn test_usd_value() {
        // 0.03 units of a 7-decimal token at 2000 USD, 8 decimals.
        let value = OracleService::usd_value(300_000, 7, &rate(200_000_000_000, 8));
        assert_eq!(value, Ok(60 * USD_WEI));

        // 18-decimal amounts reduce to amount * rate / 10^decimals.
        let value =
            OracleService::usd_value(30_000_000_000_000_000, 18, &rate(200_000_000_000, 8));
        assert_eq!(value, Ok(60 * USD_WEI));

        // Truncates.
        assert_eq!(OracleService::usd_value(3, 18, &rate(5, 1)), Ok(1));
        assert_eq!(OracleService::usd_value(1_999, 21, &rate(1, 0)), Ok(1));
    }

    #[test]
    fn test_usd_value_of_large_payment() {
        // One billion units of a 7-decimal token at 2000 USD.
        let value = OracleService::usd_value(
            1_000_000_000 * 10_000_000,
            7,
            &rate(200_000_000_000, 8),
        );
        assert_eq!(value, Ok(2_000_000_000_000 * USD_WEI));
    }

    #[test]
    fn test_usd_value_rejects_bad_rates() {
        assert_eq!(
            OracleService::usd_value(1, 18, &rate(0, 8)),
            Err(Error::InvalidPriceFeedRate)
        );
        assert_eq!(
            OracleService::usd_value(1, 18, &rate(-5, 8)),
            Err(Error::InvalidPriceFeedRate)
        );
        assert_eq!(
            OracleService::usd_value(1, 18, &rate(1, 40)),
            Err(Error::ArithmeticOverflow)
        );
        assert_eq!(
            OracleService::usd_value(i128::MAX, 18, &rate(2, 0)),
            Err(Error::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_ensure_covers() {
        assert!(OracleService::ensure_covers(20, 20).is_ok());
        assert!(OracleService::ensure_covers(21, 20).is_ok());
        assert_eq!(
            OracleService::ensure_covers(19, 20),
            Err(Error::InsufficientPayment)
        );
    }
}
