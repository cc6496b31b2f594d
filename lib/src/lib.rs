#![no_std]
pub mod admin;
pub mod errors;
pub mod ports;
pub mod storage_keys;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use errors::RegistryError;
pub use storage_keys::*;
pub use types::*;

// Config
pub const ADMIN_KEY: &str = "admin";

/// One whole unit of the native asset (7 decimals).
pub const NATIVE_UNIT: i128 = 10_000_000;

// Relayer registry
pub const MAX_TRADE_FEE: u32 = 1000; // exclusive, basis points
pub const RESIGN_LOCK_SECONDS: u64 = 4 * 7 * 24 * 60 * 60; // 4 weeks
pub const DEFAULT_MAX_RELAYERS: u32 = 100;
pub const DEFAULT_MAX_TOKEN_LIST: u32 = 200;
pub const MAX_TOKEN_LIST_CAP: u32 = 1000;
pub const DEFAULT_MIN_DEPOSIT: i128 = 25_000 * NATIVE_UNIT;
pub const MIN_TOP_UP: i128 = NATIVE_UNIT;

// Token listing
pub const DEFAULT_LISTING_FEE: i128 = 100 * NATIVE_UNIT;

// Issuer stake
pub const DEFAULT_MIN_CAP: i128 = 10 * NATIVE_UNIT;

// Lending registry
pub const MIN_LENDING_TERM_SECONDS: u64 = 60;
pub const MIN_DEPOSIT_RATE: u32 = 100;
pub const MIN_LIQUIDATION_RATE: u32 = 100; // exclusive

// Storage TTL (in ledgers, ~5s each)
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const PERSISTENT_TTL_EXTEND: u32 = 1_036_800; // ~60 days
pub const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
pub const INSTANCE_TTL_EXTEND: u32 = 1_036_800;
