use serde_json::Value;
use std::sync::Arc;

use crate::domain::transaction::{BaseTransaction, Transaction};
use crate::error::Error;
use crate::remote::RemoteClient;
use crate::services::registry::VariantRegistry;

/// Builds typed transactions from raw attribute trees.
///
/// Holds the remote client and the variant registry; the registry is fixed
/// at construction, so the factory is freely shareable across tasks.
pub struct TransactionFactory {
    client: Arc<dyn RemoteClient>,
    registry: VariantRegistry,
}

impl TransactionFactory {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        TransactionFactory::with_registry(client, VariantRegistry::with_default_variants())
    }

    pub fn with_registry(client: Arc<dyn RemoteClient>, registry: VariantRegistry) -> Self {
        TransactionFactory { client, registry }
    }

    pub fn client(&self) -> &Arc<dyn RemoteClient> {
        &self.client
    }

    /// Looks up a transaction by its server-assigned token and returns the
    /// concrete variant its discriminator names.
    ///
    /// A blank token fails with [`Error::InvalidInput`] before any network
    /// call is made.
    pub async fn find_by_token(&self, token: &str) -> Result<Transaction, Error> {
        if token.trim().is_empty() {
            return Err(Error::InvalidInput(
                "transaction token may not be empty".to_string(),
            ));
        }

        let attrs = self
            .client
            .get(&format!("/transactions/{token}.xml"), "transaction")
            .await?;
        self.decode(attrs)
    }

    /// Decodes a raw attribute tree through the registry.
    ///
    /// Unrecognized discriminators decode as [`Transaction::Other`] rather
    /// than erroring, so transaction types added server-side after this
    /// build still come back with their base fields intact.
    pub fn decode(&self, attrs: Value) -> Result<Transaction, Error> {
        let transaction_type = attrs
            .get("transaction_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match self.registry.resolve(&transaction_type) {
            Some(decoder) => decoder(attrs),
            None => {
                tracing::debug!(
                    %transaction_type,
                    "unregistered transaction type, decoding as generic transaction"
                );
                Ok(Transaction::Other(BaseTransaction::from_attributes(attrs)?))
            }
        }
    }
}
