use super::*;
use crate::models::{Transaction, TransactionPayload, Webhook, WebhookPayload};

impl TwitchClient {
    /// Bits transactions for an extension owned by this client id.
    pub async fn get_extension_transactions(
        &self,
        extension_id: &str,
    ) -> Result<Vec<Transaction>, TwitchError> {
        let extension_id = extension_id.trim();
        if extension_id.is_empty() {
            return Err(TwitchError::Validation("extension_id is empty".into()));
        }
        let data: Vec<TransactionPayload> = self
            .get_data(&format!(
                "/extensions/transactions?extension_id={}",
                encode(extension_id)
            ))
            .await?;
        data.into_iter().map(Transaction::try_from).collect()
    }

    /// Webhook subscriptions registered by this client id.
    pub async fn get_webhook_subscriptions(&self) -> Result<Vec<Webhook>, TwitchError> {
        let data: Vec<WebhookPayload> = self.get_data("/webhooks/subscriptions").await?;
        Ok(data.into_iter().map(Webhook::from).collect())
    }
}
