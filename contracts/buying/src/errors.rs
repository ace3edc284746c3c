use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    /// Item name was empty.
    EmptyName = 2,
    /// Listing price was zero or negative.
    InvalidAmount = 3,
    /// Purchase carried no payment.
    AmountRequired = 4,
    ItemNotFound = 5,
    NotAuthorized = 6,
    /// Payment converts to less USD than the item costs.
    InsufficientPayment = 7,
    PriceFeedUnavailable = 8,
    InvalidPriceFeedRate = 9,
    ArithmeticOverflow = 10,
}
