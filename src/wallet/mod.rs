use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, ecdsa::Signature};
use sha2::{Digest, Sha256};

/// A freshly generated identity, all fields hex encoded.
#[derive(Debug, Clone)]
pub struct Keypair {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

/// Generate a new secp256k1 keypair.
/// The address is the hex of the compressed public key.
pub fn generate_keypair() -> Keypair {
    let secp = Secp256k1::new();
    let (sk, pk) = secp.generate_keypair(&mut OsRng);
    let public_key = hex::encode(pk.serialize()); // compressed (33 bytes)
    Keypair {
        private_key: hex::encode(sk.secret_bytes()),
        address: public_key.clone(),
        public_key,
    }
}

/// Derive the address from a hex public key (compressed or uncompressed).
/// Always returns the lowercase compressed form.
pub fn pubkey_to_address_hex(pubkey_hex: &str) -> Result<String, &'static str> {
    let bytes = hex::decode(pubkey_hex.trim()).map_err(|_| "invalid pubkey hex")?;
    let pk = PublicKey::from_slice(&bytes).map_err(|_| "invalid pubkey bytes")?;
    Ok(hex::encode(pk.serialize()))
}

/// SHA-256 of an arbitrary signing payload.
pub fn digest(payload: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

/// Verify a hex DER signature against a hex public key and a 32-byte digest.
pub fn verify_signature_hex(
    pubkey_hex: &str,
    sig_hex: &str,
    msg32: [u8; 32],
) -> Result<bool, &'static str> {
    let secp = Secp256k1::verification_only();

    let sig_bytes = hex::decode(sig_hex.trim()).map_err(|_| "invalid signature hex")?;
    let sig = Signature::from_der(&sig_bytes).map_err(|_| "invalid DER signature")?;

    let pk_bytes = hex::decode(pubkey_hex.trim()).map_err(|_| "invalid pubkey hex")?;
    let pk = PublicKey::from_slice(&pk_bytes).map_err(|_| "invalid pubkey bytes")?;

    let msg = Message::from_slice(&msg32).map_err(|_| "invalid message length")?;
    Ok(secp.verify_ecdsa(&msg, &sig, &pk).is_ok())
}

/// Sign a 32-byte digest with a hex private key, returning hex DER.
#[cfg(test)]
pub fn sign_hex(privkey_hex: &str, msg32: [u8; 32]) -> Result<String, &'static str> {
    let secp = Secp256k1::signing_only();
    let sk_bytes = hex::decode(privkey_hex.trim()).map_err(|_| "invalid private key hex")?;
    let sk = secp256k1::SecretKey::from_slice(&sk_bytes)
        .map_err(|_| "invalid private key bytes")?;
    let msg = Message::from_slice(&msg32).map_err(|_| "invalid message length")?;
    let sig = secp.sign_ecdsa(&msg, &sk);
    Ok(hex::encode(&*sig.serialize_der()))
}
