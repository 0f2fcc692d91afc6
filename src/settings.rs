use serde::Deserialize;

use crate::errors::provider::ProviderError;
use crate::errors::settings::SettingsError;
use crate::models::bill::BillStatus;
use crate::models::order::{OrderStatus, StatusMapping};
use crate::models::wallet::WalletList;
use crate::provider::ProviderClient;

/// One submitted wallet row from the admin surface. A blank name falls back
/// to the provider's currency name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WalletSubmission {
    pub id: i64,
    #[serde(default)]
    pub currency_name: Option<String>,
}

/// Checks the configured key/secret against the provider by requesting an
/// auth token. A rejected pair and an unreachable provider are distinct
/// outcomes; only the former means the credentials are wrong.
pub async fn validate_credentials(provider: &dyn ProviderClient) -> Result<(), SettingsError> {
    match provider.get_auth_token().await {
        Ok(_) => Ok(()),
        Err(ProviderError::Auth) => Err(SettingsError::InvalidCredentials),
        Err(other) => Err(SettingsError::Unreachable(other.to_string())),
    }
}

/// Refreshes wallet metadata from the provider for each submitted id.
///
/// Unknown ids are skipped with a warning and the rest of the batch still
/// goes through; the save is tolerant of partial failure, not atomic. An
/// empty submission is an admin error.
pub async fn refresh_wallet_list(
    provider: &dyn ProviderClient,
    submissions: &[WalletSubmission],
) -> Result<WalletList, SettingsError> {
    if submissions.is_empty() {
        return Err(SettingsError::NoWallets);
    }

    let mut wallets = WalletList::default();

    for submission in submissions {
        let mut wallet = match provider.get_wallet(submission.id).await {
            Ok(wallet) => wallet,
            Err(ProviderError::WalletNotFound(id)) => {
                tracing::warn!("Incorrect wallet id {id}, skipping");
                continue;
            }
            Err(other) => return Err(SettingsError::Unreachable(other.to_string())),
        };

        if let Some(name) = submission
            .currency_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            wallet.currency_name = name.to_string();
        }

        wallets.push(wallet);
    }

    Ok(wallets)
}

/// Builds a status mapping from admin-submitted `(code, local status)`
/// pairs. Values outside the order store's known status set are silently
/// dropped rather than failing the whole save.
pub fn save_status_mapping<'a, I>(submitted: I) -> StatusMapping
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut mapping = StatusMapping::empty();

    for (code, local) in submitted {
        let Some(status) = BillStatus::from_code(code) else {
            continue;
        };
        let Ok(local) = local.parse::<OrderStatus>() else {
            continue;
        };
        mapping.insert(status, local);
    }

    mapping
}
