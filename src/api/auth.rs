use log::debug;
use serde_json::{Value, json};

use crate::registry::Address;
use crate::wallet::{digest, pubkey_to_address_hex, verify_signature_hex};

pub const OP_SET_RATE: &str = "set_rate";
pub const OP_SET_HOLDERS: &str = "set_holders";
pub const OP_SET_LIQUIDITY: &str = "set_liquidity";
pub const OP_SET_REWARD_WALLET: &str = "set_reward_wallet";

/// Canonical signing payload for a mutation: `{"op": .., "value": ..}`.
/// serde_json keeps object keys sorted, so the bytes are stable.
pub fn signing_payload(op: &str, value: &Value) -> Vec<u8> {
    let payload = json!({ "op": op, "value": value });
    serde_json::to_vec(&payload).expect("serialize signing payload")
}

pub fn signing_digest(op: &str, value: &Value) -> [u8; 32] {
    digest(&signing_payload(op, value))
}

/// Resolve the caller address of a signed mutation.
/// Proves possession of the key only; ownership is the registry's call.
pub fn authenticate(
    op: &str,
    value: &Value,
    pubkey: &str,
    signature: &str,
) -> Result<Address, &'static str> {
    if signature.trim().is_empty() {
        return Err("missing signature");
    }
    let caller = pubkey_to_address_hex(pubkey)?;
    let ok = verify_signature_hex(pubkey, signature, signing_digest(op, value))?;
    if !ok {
        return Err("invalid signature");
    }
    debug!("AUTH - {op} signed by {caller}");
    Ok(caller)
}
