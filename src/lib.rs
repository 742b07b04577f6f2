pub mod config;
pub mod domain;
pub mod error;
pub mod remote;
pub mod services;

pub use config::Config;
pub use domain::gateway_response::GatewayResponse;
pub use domain::payment_method::PaymentMethod;
pub use domain::signature::SignedFields;
pub use domain::transaction::{
    AddPaymentMethodTransaction, AuthorizeTransaction, BaseTransaction, CaptureTransaction,
    CreditTransaction, HasIpAddress, Nullifiable, OffsitePurchaseTransaction, PurchaseTransaction,
    RedactTransaction, RetainTransaction, Transaction, TransactionFields, VoidedTransaction,
};
pub use error::Error;
pub use remote::{HttpRemoteClient, RemoteClient};
pub use services::{TransactionFactory, VariantRegistry};
