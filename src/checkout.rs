use crate::config::GatewayConfig;
use crate::errors::CoinbillError;
use crate::errors::checkout::CheckoutError;
use crate::errors::provider::ProviderError;
use crate::models::checkout::PaymentOutcome;
use crate::models::wallet::{Wallet, WalletList};
use crate::orders::OrderStore;
use crate::provider::{BillRequest, ProviderClient};

/// Validates the currency choice submitted from the checkout form and binds
/// the matching wallet. Empty submissions and ids outside the configured
/// list are shopper-visible errors.
pub fn validate_fields<'a>(
    submitted: Option<&str>,
    wallet_list: &'a WalletList,
) -> Result<&'a Wallet, CheckoutError> {
    let submitted = submitted.map(str::trim).filter(|s| !s.is_empty());

    let Some(raw) = submitted else {
        return Err(CheckoutError::CurrencyRequired);
    };

    let id: i64 = raw
        .parse()
        .map_err(|_| CheckoutError::UnknownCurrency(raw.to_string()))?;

    wallet_list
        .find(id)
        .ok_or_else(|| CheckoutError::UnknownCurrency(raw.to_string()))
}

/// Creates a provider bill for the order and reports the redirect target.
///
/// Provider failures during bill creation itself become a `fail` outcome
/// with the provider's message; conversion and markup errors propagate as a
/// generic request failure. The order is only mutated (stock, cart, note)
/// once a bill with a usable url exists.
pub async fn process_payment(
    config: &GatewayConfig,
    provider: &dyn ProviderClient,
    orders: &dyn OrderStore,
    order_id: i64,
    wallet: &Wallet,
) -> Result<PaymentOutcome, CoinbillError> {
    let order = orders
        .fetch_order(order_id)
        .await?
        .ok_or(CheckoutError::OrderNotFound(order_id))?;

    if order.total.is_sign_negative() || order.total.is_zero() {
        return Err(CheckoutError::EmptyTotal(order_id).into());
    }

    let mut amount = provider
        .convert_currency(&order.total, &order.currency, &wallet.currency_alpha)
        .await?;

    if config.markup != 0 {
        amount = provider
            .add_markup(&amount, &wallet.currency_alpha, config.markup)
            .await?;
    }

    let request = BillRequest {
        wallet_id: wallet.id,
        amount: amount.clone(),
        currency_alpha: wallet.currency_alpha.clone(),
        lifetime_seconds: config.order_lifetime,
        tracking_id: order_id.to_string(),
        callback_url: config.callback_url(),
    };

    let bill = match provider.create_bill(&request).await {
        Ok(bill) => bill,
        Err(ProviderError::Payment(message)) => {
            tracing::warn!("Bill creation rejected for order {order_id}: {message}");
            return Ok(PaymentOutcome::fail(Some(format!("Payment error: {message}"))));
        }
        Err(other) => return Err(other.into()),
    };

    if bill.url.is_empty() {
        tracing::warn!("Provider returned bill {} without a url", bill.id);
        return Ok(PaymentOutcome::fail(None));
    }

    orders.reduce_stock(order_id).await?;
    orders.empty_cart(order_id).await?;
    orders
        .add_order_note(
            order_id,
            &format!(
                "Created new invoice for {} {}. Bill ID: {}",
                amount, wallet.currency_alpha, bill.id
            ),
        )
        .await?;

    tracing::info!(
        "Created bill {} for order {order_id}: {} {}",
        bill.id,
        amount,
        wallet.currency_alpha
    );

    Ok(PaymentOutcome::success(bill.url))
}
