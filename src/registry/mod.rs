pub mod error;
pub mod model;

pub use error::RegistryError;
pub use model::Registry;

/// Stored rate is an integer; the public rate is `stored / RATE_SCALE`.
pub const RATE_SCALE: u64 = 1000;

/// Caller identity: lowercase hex of a compressed secp256k1 public key,
/// or any address string recorded as a role.
pub type Address = String;
