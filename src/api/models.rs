use crate::registry::{Address, Registry};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state: the one registry of this deployment.
/// Each mutation runs under a single lock, so partial updates are never visible.
pub struct AppState {
    pub registry: Mutex<Registry>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Mutex::new(registry),
        }
    }
}

/* ---------- Mutation Requests ---------- */

#[derive(Deserialize)]
pub struct SetRateRequest {
    pub value: u64,
    /// Hex compressed secp256k1 public key of the caller
    pub pubkey: String,
    /// Hex DER ECDSA signature over the operation digest
    pub signature: String,
}

#[derive(Deserialize)]
pub struct SetAddressRequest {
    pub address: String,
    pub pubkey: String,
    pub signature: String,
}

/* ---------- Responses ---------- */

#[derive(Serialize, Deserialize)]
pub struct OwnerResponse {
    pub owner: Address,
}

#[derive(Serialize, Deserialize)]
pub struct RateResponse {
    pub rate: f64,
    pub raw: u64,
    pub scale: u64,
}

#[derive(Serialize, Deserialize)]
pub struct HoldersResponse {
    pub holders: Vec<Address>,
}

#[derive(Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: Option<Address>,
}
