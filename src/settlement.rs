use crate::config::GatewayConfig;
use crate::errors::order::OrderError;
use crate::models::bill::BillStatus;
use crate::models::webhook::{WebhookPayload, WebhookReply};
use crate::orders::OrderStore;
use crate::utils::amount::format_amount;

fn required<'a>(field: &'a Option<String>) -> Option<&'a str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Reconciles one provider callback against the local order.
///
/// Returns the structured reply the HTTP layer should send; order-store
/// failures bubble up separately as internal errors. Once authentication,
/// payload shape and order lookup pass, the reply is always `200 OK` — the
/// provider retries anything else indefinitely. The whole flow is safe to
/// repeat for redelivered callbacks: completion no-ops on a paid order and
/// duplicate notes are accepted.
pub async fn settle(
    config: &GatewayConfig,
    expected_authorization: &str,
    authorization: Option<&str>,
    payload: &WebhookPayload,
    orders: &dyn OrderStore,
) -> Result<WebhookReply, OrderError> {
    if authorization != Some(expected_authorization) {
        tracing::warn!("Webhook rejected: bad or missing Authorization header");
        return Ok(WebhookReply::unauthorized());
    }

    let (Some(bill_id), Some(tracking_id), Some(status)) = (
        required(&payload.id),
        required(&payload.tracking_id),
        required(&payload.status),
    ) else {
        tracing::warn!("Webhook rejected: missing id, tracking_id or status");
        return Ok(WebhookReply::bad_request());
    };

    // Status codes outside the provider's closed set are malformed input.
    let Some(status) = BillStatus::from_code(status) else {
        tracing::warn!("Webhook rejected: unknown bill status code {status:?}");
        return Ok(WebhookReply::bad_request());
    };

    // The order must resolve before anything is mutated.
    let Ok(order_id) = tracking_id.parse::<i64>() else {
        tracing::warn!("Webhook with unusable tracking_id {tracking_id:?}, bill {bill_id}");
        return Ok(WebhookReply::not_found());
    };
    let Some(order) = orders.fetch_order(order_id).await? else {
        tracing::warn!("Webhook for unknown order {tracking_id}, bill {bill_id}");
        return Ok(WebhookReply::not_found());
    };

    if status == BillStatus::Success {
        let (Some(amount), Some(actual_amount)) =
            (required(&payload.amount), required(&payload.actual_amount))
        else {
            tracing::warn!("Success webhook for order {} without amounts", order.id);
            return Ok(WebhookReply::bad_request());
        };

        if amount == actual_amount {
            orders.payment_complete(order.id).await?;
            orders
                .add_order_note(order.id, &format!("Payment complete! Bill ID: {bill_id}"))
                .await?;
            tracing::info!("Order {} paid in full, bill {bill_id}", order.id);
        } else {
            // Partial payment: note both sides, complete nothing.
            let pow = required(&payload.pow).unwrap_or("0");
            let alpha = required(&payload.currency_alpha).unwrap_or("");

            orders
                .add_order_note(
                    order.id,
                    &format!(
                        "Received payment. Current amount: {} {alpha}. Requested amount: {} {alpha}. Bill ID: {bill_id}",
                        format_amount(actual_amount, pow),
                        format_amount(amount, pow),
                    ),
                )
                .await?;
            tracing::info!(
                "Order {} partially paid ({actual_amount} of {amount}), bill {bill_id}",
                order.id
            );
        }
    }

    if let Some(note) = status.note(bill_id) {
        orders.add_order_note(order.id, &note).await?;

        if let Some(local) = config.status_mapping.resolve(status) {
            orders.update_status(order.id, local).await?;
            tracing::info!("Order {} moved to {local} on bill status {status:?}", order.id);
        }
    }

    Ok(WebhookReply::ok())
}
