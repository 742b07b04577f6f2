//! Transaction variant model.
//!
//! Every transaction returned by the remote service carries the same base
//! fields plus a `transaction_type` discriminator that determines its
//! concrete variant. Instances are immutable snapshots of server state at
//! fetch time; follow-up operations never mutate them, they produce a newly
//! decoded result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::gateway_response::GatewayResponse;
use crate::domain::payment_method::PaymentMethod;
use crate::domain::signature::{self, SignedFields};
use crate::error::Error;
use crate::remote::RemoteClient;

/// Base fields shared by every transaction variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransactionFields {
    pub token: String,
    pub transaction_type: String,
    /// Status as reported by the gateway (`succeeded`, `failed`, `pending`,
    /// ...). Opaque at this layer; not re-validated locally.
    pub state: Option<String>,
    pub succeeded: bool,
    pub on_test_gateway: bool,
    pub amount: Option<i64>,
    pub currency_code: Option<String>,
    pub order_id: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub gateway_token: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub callback_url: Option<String>,
    pub checkout_url: Option<String>,
    pub redirect_url: Option<String>,
    pub ip: Option<String>,
}

/// A transaction whose discriminator is not in the registry.
///
/// Unknown types degrade to the base fields instead of erroring so that new
/// server-side transaction types do not break existing callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BaseTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetainTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RedactTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AddPaymentMethodTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthorizeTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
    pub response: GatewayResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PurchaseTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
    pub response: GatewayResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    /// Token of the authorization this capture acted upon. A back-reference
    /// by identifier, not a live object; look it up separately if needed.
    pub reference_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoidedTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub reference_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CreditTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub reference_token: Option<String>,
}

/// Purchase completed through a redirect to a third-party payment page.
///
/// Carries a response snapshot per phase of the flow plus the server's
/// signing envelope used to authenticate the return callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OffsitePurchaseTransaction {
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub payment_method: PaymentMethod,
    pub setup_response: GatewayResponse,
    pub redirect_response: GatewayResponse,
    pub callback_response: GatewayResponse,
    pub signed: SignedFields,
    pub api_urls: Map<String, Value>,
}

macro_rules! from_attributes {
    ($($variant:ty),+ $(,)?) => {
        $(impl $variant {
            /// Builds this variant from a raw attribute tree.
            pub fn from_attributes(attrs: Value) -> Result<Self, Error> {
                Ok(serde_json::from_value(attrs)?)
            }
        })+
    };
}

from_attributes!(
    BaseTransaction,
    RetainTransaction,
    RedactTransaction,
    AddPaymentMethodTransaction,
    AuthorizeTransaction,
    PurchaseTransaction,
    CaptureTransaction,
    VoidedTransaction,
    CreditTransaction,
    OffsitePurchaseTransaction,
);

/// The closed set of transaction variants, plus a generic fallback for
/// discriminators this build does not know about.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Retain(RetainTransaction),
    Redact(RedactTransaction),
    AddPaymentMethod(AddPaymentMethodTransaction),
    Authorize(AuthorizeTransaction),
    Purchase(PurchaseTransaction),
    Capture(CaptureTransaction),
    Voided(VoidedTransaction),
    Credit(CreditTransaction),
    OffsitePurchase(OffsitePurchaseTransaction),
    Other(BaseTransaction),
}

impl Transaction {
    pub fn fields(&self) -> &TransactionFields {
        match self {
            Transaction::Retain(t) => &t.fields,
            Transaction::Redact(t) => &t.fields,
            Transaction::AddPaymentMethod(t) => &t.fields,
            Transaction::Authorize(t) => &t.fields,
            Transaction::Purchase(t) => &t.fields,
            Transaction::Capture(t) => &t.fields,
            Transaction::Voided(t) => &t.fields,
            Transaction::Credit(t) => &t.fields,
            Transaction::OffsitePurchase(t) => &t.fields,
            Transaction::Other(t) => &t.fields,
        }
    }

    pub fn token(&self) -> &str {
        &self.fields().token
    }

    pub fn transaction_type(&self) -> &str {
        &self.fields().transaction_type
    }

    pub fn succeeded(&self) -> bool {
        self.fields().succeeded
    }
}

/// Exposes the originating IP address recorded on a transaction.
///
/// Not implemented for retain/redact: those act on stored payment methods,
/// not monetary movements, and carry no transaction-level IP.
pub trait HasIpAddress {
    fn ip(&self) -> Option<&str>;
}

macro_rules! has_ip_address {
    ($($variant:ty),+ $(,)?) => {
        $(impl HasIpAddress for $variant {
            fn ip(&self) -> Option<&str> {
                self.fields.ip.as_deref()
            }
        })+
    };
}

has_ip_address!(
    AddPaymentMethodTransaction,
    AuthorizeTransaction,
    PurchaseTransaction,
    CaptureTransaction,
    VoidedTransaction,
    CreditTransaction,
    OffsitePurchaseTransaction,
);

/// Follow-up operations for variants that can be reversed or adjusted after
/// the fact: purchases, captures, and offsite purchases.
#[async_trait]
pub trait Nullifiable {
    /// Cancels the transaction out entirely. Always reverses in full; the
    /// remote service accepts no amount here.
    async fn void(
        &self,
        client: &dyn RemoteClient,
        ip_address: Option<&str>,
    ) -> Result<VoidedTransaction, Error>;

    /// Credits `amount` back to the payer, or the entire previous amount
    /// when `amount` is `None`.
    async fn credit(
        &self,
        client: &dyn RemoteClient,
        amount: Option<i64>,
        ip_address: Option<&str>,
    ) -> Result<CreditTransaction, Error>;
}

macro_rules! nullifiable {
    ($($variant:ty),+ $(,)?) => {
        $(#[async_trait]
        impl Nullifiable for $variant {
            async fn void(
                &self,
                client: &dyn RemoteClient,
                ip_address: Option<&str>,
            ) -> Result<VoidedTransaction, Error> {
                post_void(client, &self.fields.token, ip_address).await
            }

            async fn credit(
                &self,
                client: &dyn RemoteClient,
                amount: Option<i64>,
                ip_address: Option<&str>,
            ) -> Result<CreditTransaction, Error> {
                post_credit(client, &self.fields.token, amount, ip_address).await
            }
        })+
    };
}

nullifiable!(
    PurchaseTransaction,
    CaptureTransaction,
    OffsitePurchaseTransaction,
);

async fn post_void(
    client: &dyn RemoteClient,
    token: &str,
    ip_address: Option<&str>,
) -> Result<VoidedTransaction, Error> {
    let body = json!({ "transaction": { "ip": ip_address } });
    let attrs = client
        .post(&format!("/transactions/{token}/void.xml"), body, "transaction")
        .await?;
    VoidedTransaction::from_attributes(attrs)
}

async fn post_credit(
    client: &dyn RemoteClient,
    token: &str,
    amount: Option<i64>,
    ip_address: Option<&str>,
) -> Result<CreditTransaction, Error> {
    // A full credit posts a bare top-level `ip`; only a partial credit nests
    // under `transaction`. That asymmetry is the remote API's contract.
    let body = match amount {
        None => json!({ "ip": ip_address }),
        Some(amount) => json!({ "transaction": { "amount": amount, "ip": ip_address } }),
    };
    let attrs = client
        .post(&format!("/transactions/{token}/credit.xml"), body, "transaction")
        .await?;
    CreditTransaction::from_attributes(attrs)
}

impl AuthorizeTransaction {
    /// Captures the previously authorized payment. With no amount the
    /// capture settles the full originally authorized amount; gateways that
    /// support partial capture take an explicit amount.
    pub async fn capture(
        &self,
        client: &dyn RemoteClient,
        amount: Option<i64>,
        ip_address: Option<&str>,
    ) -> Result<CaptureTransaction, Error> {
        let body = match amount {
            None => json!({}),
            Some(amount) => json!({ "transaction": { "amount": amount, "ip": ip_address } }),
        };
        let attrs = client
            .post(
                &format!("/transactions/{}/capture.xml", self.fields.token),
                body,
                "transaction",
            )
            .await?;
        CaptureTransaction::from_attributes(attrs)
    }
}

impl OffsitePurchaseTransaction {
    /// Authenticates a redirect callback against the shared secret.
    ///
    /// Recomputes the HMAC over the `|`-joined values of the server-listed
    /// signed fields and compares hex digests. A well-formed but wrong
    /// signature yields `Ok(false)`; an unknown algorithm or a signed field
    /// this transaction cannot resolve is an error rather than a silent
    /// false negative.
    pub fn is_valid_signature(&self, key: &str) -> Result<bool, Error> {
        let mut values = Vec::new();
        for name in self.signed.fields.split_whitespace() {
            values.push(self.signable_value(name)?);
        }
        let message = values.join("|");
        let digest = signature::hmac_hex(&self.signed.algorithm, key, &message)?;
        Ok(digest == self.signed.signature)
    }

    /// Resolves a signed field name against this instance's own state.
    ///
    /// The signable set is enumerated here explicitly so that a bad field
    /// name fails loudly instead of hashing an empty placeholder.
    fn signable_value(&self, name: &str) -> Result<String, Error> {
        let fields = &self.fields;
        let value = match name {
            "token" => Some(fields.token.clone()),
            "transaction_type" => Some(fields.transaction_type.clone()),
            "state" => fields.state.clone(),
            "succeeded" => Some(fields.succeeded.to_string()),
            "on_test_gateway" => Some(fields.on_test_gateway.to_string()),
            "amount" => fields.amount.map(|a| a.to_string()),
            "currency_code" => fields.currency_code.clone(),
            "order_id" => fields.order_id.clone(),
            "description" => fields.description.clone(),
            "message" => fields.message.clone(),
            "gateway_token" => fields.gateway_token.clone(),
            "callback_url" => fields.callback_url.clone(),
            "checkout_url" => fields.checkout_url.clone(),
            "redirect_url" => fields.redirect_url.clone(),
            "ip" => fields.ip.clone(),
            "created_at" => fields.created_at.map(|t| t.to_rfc3339()),
            "updated_at" => fields.updated_at.map(|t| t.to_rfc3339()),
            _ => None,
        };
        value.ok_or_else(|| Error::SignatureFieldMissing(name.to_string()))
    }
}
