use serde_json::Value;
use std::collections::HashMap;

use crate::domain::transaction::{
    AddPaymentMethodTransaction, AuthorizeTransaction, CaptureTransaction, CreditTransaction,
    OffsitePurchaseTransaction, PurchaseTransaction, RedactTransaction, RetainTransaction,
    Transaction, VoidedTransaction,
};
use crate::error::Error;

/// Decodes a raw attribute tree into one concrete transaction variant.
pub type VariantDecoder = fn(Value) -> Result<Transaction, Error>;

/// Maps the server's `transaction_type` discriminator to the decoder for the
/// concrete variant it names.
///
/// Populated explicitly at construction and read-only afterwards, so it is
/// safe to share across tasks once the factory holds it. Registration is
/// last-wins per discriminator.
pub struct VariantRegistry {
    map: HashMap<String, VariantDecoder>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        VariantRegistry { map: HashMap::new() }
    }

    /// Builds the registry covering every variant the crate knows about.
    pub fn with_default_variants() -> Self {
        let mut registry = VariantRegistry::new();
        registry.register("RetainPaymentMethod", |attrs| {
            Ok(Transaction::Retain(RetainTransaction::from_attributes(attrs)?))
        });
        registry.register("RedactPaymentMethod", |attrs| {
            Ok(Transaction::Redact(RedactTransaction::from_attributes(attrs)?))
        });
        registry.register("AddPaymentMethod", |attrs| {
            Ok(Transaction::AddPaymentMethod(
                AddPaymentMethodTransaction::from_attributes(attrs)?,
            ))
        });
        registry.register("Authorization", |attrs| {
            Ok(Transaction::Authorize(AuthorizeTransaction::from_attributes(attrs)?))
        });
        registry.register("Purchase", |attrs| {
            Ok(Transaction::Purchase(PurchaseTransaction::from_attributes(attrs)?))
        });
        registry.register("Capture", |attrs| {
            Ok(Transaction::Capture(CaptureTransaction::from_attributes(attrs)?))
        });
        registry.register("Void", |attrs| {
            Ok(Transaction::Voided(VoidedTransaction::from_attributes(attrs)?))
        });
        registry.register("Credit", |attrs| {
            Ok(Transaction::Credit(CreditTransaction::from_attributes(attrs)?))
        });
        registry.register("OffsitePurchase", |attrs| {
            Ok(Transaction::OffsitePurchase(
                OffsitePurchaseTransaction::from_attributes(attrs)?,
            ))
        });
        registry
    }

    pub fn register(&mut self, discriminator: impl Into<String>, decoder: VariantDecoder) {
        self.map.insert(discriminator.into(), decoder);
    }

    pub fn resolve(&self, discriminator: &str) -> Option<VariantDecoder> {
        self.map.get(discriminator).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        VariantRegistry::with_default_variants()
    }
}
