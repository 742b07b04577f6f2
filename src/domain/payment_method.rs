use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of the stored payment method embedded in a transaction response.
///
/// Owned exclusively by its parent transaction. When the server omits the
/// nested `payment_method` element the parent holds an empty snapshot, never
/// a null. Attributes we do not model explicitly are retained in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentMethod {
    pub token: Option<String>,
    pub payment_method_type: Option<String>,
    pub email: Option<String>,
    pub card_type: Option<String>,
    pub last_four_digits: Option<String>,
    pub storage_state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentMethod {
    pub fn is_empty(&self) -> bool {
        self == &PaymentMethod::default()
    }
}
