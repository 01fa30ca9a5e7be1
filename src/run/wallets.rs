use std::collections::HashSet;

use alloy::primitives::{Address, B256, U256};

use crate::error::{Error, Result};

/// The weiroll wallet a run acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSelection {
    pub wallet: Address,
    /// Every wallet has already executed: amounts come from recorded deposits only.
    pub mock_amounts: bool,
    /// Non-executed wallets skipped by this run.
    pub ignored: Vec<Address>,
}

/// Pick the wallet to execute.
///
/// The first non-executed wallet wins, in bridge order. When every wallet has
/// executed, the last one is chosen for a simulation with mock amounts.
pub fn select_wallet(market_hash: B256, wallets: &[Address], executed: &[Address]) -> Result<WalletSelection> {
    let Some(last) = wallets.last() else {
        return Err(Error::NoWallets(market_hash));
    };

    let executed: HashSet<&Address> = executed.iter().collect();
    let mut pending = wallets.iter().filter(|w| !executed.contains(w)).copied();

    match pending.next() {
        None => Ok(WalletSelection {
            wallet: *last,
            mock_amounts: true,
            ignored: Vec::new(),
        }),
        Some(wallet) => Ok(WalletSelection {
            wallet,
            mock_amounts: false,
            ignored: pending.collect(),
        }),
    }
}

/// Amount per input token the recipe will see: the recorded deposit plus any
/// loose balance already sitting in the wallet. In mock mode the balance is
/// ignored since the wallet has already been emptied.
pub fn effective_amounts(deposits: &[U256], balances: &[U256], mock_amounts: bool) -> Vec<U256> {
    if mock_amounts {
        return deposits.to_vec();
    }
    deposits
        .iter()
        .enumerate()
        .map(|(i, d)| d.saturating_add(balances.get(i).copied().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    #[test]
    fn no_wallets_is_an_error() {
        let err = select_wallet(B256::ZERO, &[], &[]).unwrap_err();
        assert!(matches!(err, Error::NoWallets(_)));
        assert_eq!(err.to_string(), format!("No assets have been bridged for market {}", B256::ZERO));
    }

    #[test]
    fn picks_first_pending_wallet_and_reports_the_rest() {
        let wallets = [wallet(1), wallet(2), wallet(3), wallet(4)];
        let sel = select_wallet(B256::ZERO, &wallets, &[wallet(1), wallet(3)]).unwrap();
        assert_eq!(sel.wallet, wallet(2));
        assert!(!sel.mock_amounts);
        assert_eq!(sel.ignored, vec![wallet(4)]);
    }

    #[test]
    fn all_executed_uses_last_wallet_in_mock_mode() {
        let wallets = [wallet(1), wallet(2)];
        let sel = select_wallet(B256::ZERO, &wallets, &[wallet(2), wallet(1)]).unwrap();
        assert_eq!(sel.wallet, wallet(2));
        assert!(sel.mock_amounts);
        assert!(sel.ignored.is_empty());
    }

    #[test]
    fn executed_wallets_outside_the_list_are_ignored() {
        let sel = select_wallet(B256::ZERO, &[wallet(1)], &[wallet(9)]).unwrap();
        assert_eq!(sel.wallet, wallet(1));
        assert!(!sel.mock_amounts);
    }

    #[test]
    fn amounts_add_balance_unless_mocked() {
        let deposits = [U256::from(100), U256::from(7)];
        let balances = [U256::from(50), U256::ZERO];
        assert_eq!(
            effective_amounts(&deposits, &balances, false),
            vec![U256::from(150), U256::from(7)]
        );
        assert_eq!(effective_amounts(&deposits, &balances, true), deposits.to_vec());
    }

    #[test]
    fn amounts_saturate() {
        let amounts = effective_amounts(&[U256::MAX], &[U256::from(1)], false);
        assert_eq!(amounts, vec![U256::MAX]);
    }
}
