use soroban_sdk::contracterror;

/// Every way a registry call can be rejected. Codes are stable: clients match
/// on the numeric value, so new variants are only ever appended to a group.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    // Lifecycle
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // Authorization
    Unauthorized = 10,
    CallerIsAdmin = 11,
    CallerIsCoinbase = 12,
    CoinbaseIsAdmin = 13,
    NotTokenIssuer = 14,

    // State preconditions
    RelayerAlreadyRegistered = 20,
    RelayerNotRegistered = 21,
    RelayerClosing = 22,
    RelayerOnSale = 23,
    RelayerNotOnSale = 24,
    ResignAlreadyRequested = 25,
    NoResignRequest = 26,
    OwnerAlreadyRegistered = 27,
    BuyerIsOwner = 28,
    TokenNotApplied = 29,

    // Validation
    InvalidTradeFee = 40,
    PairLengthMismatch = 41,
    TokenNotListed = 42,
    HubRouteMissing = 43,
    DepositTooLow = 44,
    TopUpTooLow = 45,
    InvalidPrice = 46,
    PriceMismatch = 47,
    PairNotFound = 48,
    PairAlreadyListed = 49,
    InvalidConfiguration = 50,
    InvalidCollateralRates = 51,
    CollateralAlreadyStandard = 52,
    CollateralNotConfigured = 53,
    BaseTokenNotSupported = 54,
    TermNotSupported = 55,
    TermTooShort = 56,
    CollateralNotSupported = 57,
    ListingFeeMismatch = 58,
    TokenAlreadyListed = 59,
    NativeTokenImplicit = 60,
    CapacityTooLow = 61,
    InvalidAmount = 62,

    // Capacity
    MaxRelayersReached = 80,
    TooManyPairs = 81,
}
