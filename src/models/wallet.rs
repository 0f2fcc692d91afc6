use serde::{Deserialize, Serialize};

/// A provider-side payout destination, cached from the provider's wallet
/// lookup at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub currency_name: String,
    pub currency_alpha: String,
    pub currency_iso: i32,
}

/// Ordered wallet list. Insertion order is display order on checkout and the
/// first entry is the default selection. An empty list disables the currency
/// form entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletList(pub Vec<Wallet>);

impl WalletList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Wallet> {
        self.0.iter().find(|wallet| wallet.id == id)
    }

    /// Appends a wallet, replacing any earlier entry with the same id so
    /// ids stay unique within the list.
    pub fn push(&mut self, wallet: Wallet) {
        self.0.retain(|existing| existing.id != wallet.id);
        self.0.push(wallet);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(id: i64, alpha: &str) -> Wallet {
        Wallet {
            id,
            currency_name: alpha.to_string(),
            currency_alpha: alpha.to_string(),
            currency_iso: 1000,
        }
    }

    #[test]
    fn push_replaces_duplicate_ids() {
        let mut list = WalletList::default();
        list.push(wallet(1, "BTC"));
        list.push(wallet(2, "ETH"));
        list.push(wallet(1, "LTC"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.find(1).unwrap().currency_alpha, "LTC");
        // The replaced entry moves to the back, order otherwise preserved.
        assert_eq!(list.0[0].id, 2);
    }
}
