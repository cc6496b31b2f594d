use soroban_sdk::{symbol_short, Symbol};

// Event topics shared by the registry contracts.
pub const TOKEN_LISTED: Symbol = symbol_short!("listed");
pub const STAKE_APPLIED: Symbol = symbol_short!("apply");
pub const STAKE_CHARGED: Symbol = symbol_short!("charge");
pub const ADMIN_CHANGED: Symbol = symbol_short!("admin");

pub const RELAYER_REGISTERED: &str = "relayer_registered";
pub const RELAYER_UPDATED: &str = "relayer_updated";
pub const RELAYER_TRANSFERRED: &str = "relayer_transferred";
pub const RELAYER_DEPOSITED: &str = "relayer_deposited";
pub const RELAYER_RESIGNED: &str = "relayer_resigned";
pub const RELAYER_REFUNDED: &str = "relayer_refunded";
pub const REFUND_LOCKED: &str = "refund_locked";
pub const RELAYER_FOR_SALE: &str = "relayer_for_sale";
pub const SALE_CANCELLED: &str = "sale_cancelled";
pub const RELAYER_SOLD: &str = "relayer_sold";
pub const RELAYER_RECONFIGURED: &str = "relayer_reconfigured";

pub const COLLATERAL_ADDED: &str = "collateral_added";
pub const ILO_COLLATERAL_ADDED: &str = "ilo_collateral_added";
pub const COLLATERAL_PRICE_SET: &str = "collateral_price_set";
pub const BASE_TOKEN_ADDED: &str = "base_token_added";
pub const TERM_ADDED: &str = "term_added";
pub const LENDING_UPDATED: &str = "lending_updated";
pub const FEEDER_CHANGED: &str = "feeder_changed";
