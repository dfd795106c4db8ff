//! Nullable bank: module account balances held in memory.

use augury_oracle::{BankKeeper, CollaboratorError};
use augury_types::Coins;
use std::collections::BTreeMap;
use std::sync::Mutex;

pub struct NullBank {
    balances: Mutex<BTreeMap<String, Coins>>,
}

impl NullBank {
    /// A bank with the given module accounts, all empty.
    pub fn with_modules(modules: &[&str]) -> Self {
        Self {
            balances: Mutex::new(
                modules
                    .iter()
                    .map(|m| (m.to_string(), Coins::empty()))
                    .collect(),
            ),
        }
    }

    /// Mint `coins` into `module`, creating the account if needed.
    pub fn fund_module(&self, module: &str, coins: &Coins) {
        let mut balances = self.balances.lock().unwrap();
        let balance = balances.entry(module.to_string()).or_default();
        if let Some(sum) = balance.checked_add(coins) {
            *balance = sum;
        }
    }
}

impl BankKeeper for NullBank {
    fn has_module_account(&self, module: &str) -> bool {
        self.balances.lock().unwrap().contains_key(module)
    }

    fn module_balance(&self, module: &str) -> Coins {
        self.balances
            .lock()
            .unwrap()
            .get(module)
            .cloned()
            .unwrap_or_default()
    }

    fn send_coins_from_module_to_module(
        &self,
        from: &str,
        to: &str,
        coins: &Coins,
    ) -> Result<(), CollaboratorError> {
        let mut balances = self.balances.lock().unwrap();
        if !balances.contains_key(to) {
            return Err(CollaboratorError::UnknownModuleAccount(to.to_string()));
        }
        let source = balances
            .get(from)
            .ok_or_else(|| CollaboratorError::UnknownModuleAccount(from.to_string()))?;
        let remaining =
            source
                .checked_sub(coins)
                .ok_or_else(|| CollaboratorError::InsufficientFunds {
                    module: from.to_string(),
                    need: coins.to_string(),
                    have: source.to_string(),
                })?;
        balances.insert(from.to_string(), remaining);
        let target = balances.entry(to.to_string()).or_default();
        *target = target
            .checked_add(coins)
            .ok_or_else(|| CollaboratorError::Other("balance overflow".into()))?;
        Ok(())
    }
}
