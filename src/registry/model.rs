use chrono::Utc;
use serde::Serialize;

use super::error::{RegistryError, RegistryResult};
use super::{Address, RATE_SCALE};

/// Token parameters administered by a single owner.
/// Every setter checks the caller first, so a rejected call never touches state.
#[derive(Debug)]
pub struct Registry {
    owner: Address,
    rate: u64,
    holders: Vec<Address>,
    liquidity: Option<Address>,
    reward_wallet: Option<Address>,
    updated_at: i64, // Unix timestamp (UTC) of the last state change
}

/// Read-only view of the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub owner: Address,
    pub rate: f64,
    pub raw_rate: u64,
    pub rate_scale: u64,
    pub holders: Vec<Address>,
    pub liquidity: Option<Address>,
    pub reward_wallet: Option<Address>,
    pub updated_at: i64,
}

impl Registry {
    /// Create the registry owned by `owner`. Rate starts at 0, roles unset.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            rate: 0,
            holders: Vec::new(),
            liquidity: None,
            reward_wallet: None,
            updated_at: Utc::now().timestamp(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    fn ensure_owner(&self, caller: &str) -> RegistryResult<()> {
        if caller != self.owner {
            return Err(RegistryError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp();
    }

    /// Store a scaled rate (500 reads back as 0.5).
    /// Returns `Ok(true)` when the stored value changed.
    pub fn set_rate(&mut self, caller: &str, value: u64) -> RegistryResult<bool> {
        self.ensure_owner(caller)?;
        if self.rate == value {
            return Ok(false);
        }
        self.rate = value;
        self.touch();
        Ok(true)
    }

    pub fn rate(&self) -> f64 {
        self.rate as f64 / RATE_SCALE as f64
    }

    pub fn raw_rate(&self) -> u64 {
        self.rate
    }

    /// Record a holders address. Holders keep insertion order and never repeat;
    /// hex addresses differing only in case are the same holder.
    pub fn set_holders(&mut self, caller: &str, address: Address) -> RegistryResult<bool> {
        self.ensure_owner(caller)?;
        if self.holders.iter().any(|h| same_address(h, &address)) {
            return Ok(false);
        }
        self.holders.push(address);
        self.touch();
        Ok(true)
    }

    pub fn holders(&self) -> &[Address] {
        &self.holders
    }

    pub fn set_liquidity(&mut self, caller: &str, address: Address) -> RegistryResult<bool> {
        self.ensure_owner(caller)?;
        let changed = replace_role(&mut self.liquidity, address);
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    pub fn liquidity(&self) -> Option<&Address> {
        self.liquidity.as_ref()
    }

    pub fn set_reward_wallet(&mut self, caller: &str, address: Address) -> RegistryResult<bool> {
        self.ensure_owner(caller)?;
        let changed = replace_role(&mut self.reward_wallet, address);
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    pub fn reward_wallet(&self) -> Option<&Address> {
        self.reward_wallet.as_ref()
    }

    #[cfg(test)]
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            owner: self.owner.clone(),
            rate: self.rate(),
            raw_rate: self.rate,
            rate_scale: RATE_SCALE,
            holders: self.holders.clone(),
            liquidity: self.liquidity.clone(),
            reward_wallet: self.reward_wallet.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// EVM checksum casing is presentation only.
fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn replace_role(slot: &mut Option<Address>, address: Address) -> bool {
    if slot.as_deref().is_some_and(|current| same_address(current, &address)) {
        return false;
    }
    *slot = Some(address);
    true
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::registry::RegistryError;

    const OWNER: &str = "acct0";
    const STRANGER: &str = "acct1";
    const HOLDERS: &str = "0x6EF5A3a808aF1104151F0aE7Af59fA3D691e946c";
    const LIQUIDITY: &str = "0x8dDa136Be59c0BaEce2fBdD49A498F78f184E2ef";
    const REWARD: &str = "0x25c13Ac1562FB4359F9d227ac42eAcEBfE96bFC9";

    fn registry() -> Registry {
        Registry::new(OWNER.into())
    }

    #[test]
    fn fresh_registry_has_zero_rate_and_no_roles() {
        let r = registry();
        assert_eq!(r.rate(), 0.0);
        assert_eq!(r.raw_rate(), 0);
        assert!(r.holders().is_empty());
        assert!(r.liquidity().is_none());
        assert!(r.reward_wallet().is_none());
    }

    #[test]
    fn owner_is_the_constructing_identity() {
        assert_eq!(registry().owner(), OWNER);
    }

    #[test]
    fn rate_is_scaled_by_one_thousand() {
        let mut r = registry();
        assert_eq!(r.set_rate(OWNER, 500), Ok(true));
        assert_eq!(r.rate(), 0.5);
        assert_eq!(r.raw_rate(), 500);

        r.set_rate(OWNER, 1250).unwrap();
        assert_eq!(r.rate(), 1.25);
    }

    #[test]
    fn owner_sets_role_addresses() {
        let mut r = registry();
        r.set_holders(OWNER, HOLDERS.into()).unwrap();
        r.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
        r.set_reward_wallet(OWNER, REWARD.into()).unwrap();

        assert_eq!(r.holders()[0], HOLDERS);
        assert_eq!(r.liquidity().map(String::as_str), Some(LIQUIDITY));
        assert_eq!(r.reward_wallet().map(String::as_str), Some(REWARD));
    }

    #[test]
    fn liquidity_and_reward_wallet_are_replaced() {
        let mut r = registry();
        r.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
        r.set_liquidity(OWNER, REWARD.into()).unwrap();
        assert_eq!(r.liquidity().map(String::as_str), Some(REWARD));
    }

    #[test]
    fn holders_keep_order_without_duplicates() {
        let mut r = registry();
        assert_eq!(r.set_holders(OWNER, HOLDERS.into()), Ok(true));
        assert_eq!(r.set_holders(OWNER, LIQUIDITY.into()), Ok(true));
        assert_eq!(r.set_holders(OWNER, HOLDERS.into()), Ok(false));
        assert_eq!(r.holders(), &[HOLDERS.to_string(), LIQUIDITY.to_string()]);
    }

    #[test]
    fn checksum_casing_does_not_create_new_entries() {
        let mut r = registry();
        r.set_holders(OWNER, HOLDERS.into()).unwrap();
        assert_eq!(r.set_holders(OWNER, HOLDERS.to_lowercase()), Ok(false));
        assert_eq!(r.holders(), &[HOLDERS.to_string()]);

        r.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
        assert_eq!(r.set_liquidity(OWNER, LIQUIDITY.to_uppercase()), Ok(false));
        assert_eq!(r.liquidity().map(String::as_str), Some(LIQUIDITY));
    }

    #[test]
    fn non_owner_is_rejected_and_state_is_untouched() {
        let mut r = registry();
        r.set_rate(OWNER, 500).unwrap();
        r.set_holders(OWNER, HOLDERS.into()).unwrap();
        let before = r.snapshot();

        let expected = Err(RegistryError::Unauthorized {
            caller: STRANGER.into(),
        });
        assert_eq!(r.set_rate(STRANGER, 1), expected);
        assert_eq!(r.set_holders(STRANGER, REWARD.into()), expected);
        assert_eq!(r.set_liquidity(STRANGER, REWARD.into()), expected);
        assert_eq!(r.set_reward_wallet(STRANGER, REWARD.into()), expected);

        assert_eq!(r.snapshot(), before);
    }

    #[test]
    fn setters_are_idempotent() {
        let mut once = registry();
        once.set_rate(OWNER, 500).unwrap();
        once.set_holders(OWNER, HOLDERS.into()).unwrap();
        once.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
        once.set_reward_wallet(OWNER, REWARD.into()).unwrap();

        let mut twice = registry();
        for _ in 0..2 {
            twice.set_rate(OWNER, 500).unwrap();
            twice.set_holders(OWNER, HOLDERS.into()).unwrap();
            twice.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
            twice.set_reward_wallet(OWNER, REWARD.into()).unwrap();
        }

        let (a, b) = (once.snapshot(), twice.snapshot());
        assert_eq!(a.raw_rate, b.raw_rate);
        assert_eq!(a.holders, b.holders);
        assert_eq!(a.liquidity, b.liquidity);
        assert_eq!(a.reward_wallet, b.reward_wallet);
    }

    #[test]
    fn repeated_value_reports_no_change() {
        let mut r = registry();
        r.set_liquidity(OWNER, LIQUIDITY.into()).unwrap();
        let stamp = r.updated_at();
        assert_eq!(r.set_liquidity(OWNER, LIQUIDITY.into()), Ok(false));
        assert_eq!(r.set_rate(OWNER, 0), Ok(false));
        assert_eq!(r.updated_at(), stamp);
    }
}
