use hmac::{Hmac, Mac};
use paygate_core::{Error, OffsitePurchaseTransaction, SignedFields, TransactionFields};
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

fn reference_hmac_sha1(key: &str, message: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).unwrap();
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn offsite(amount: i64, currency: &str, signed: SignedFields) -> OffsitePurchaseTransaction {
    OffsitePurchaseTransaction {
        fields: TransactionFields {
            token: "off-token".to_string(),
            transaction_type: "OffsitePurchase".to_string(),
            amount: Some(amount),
            currency_code: Some(currency.to_string()),
            ..TransactionFields::default()
        },
        signed,
        ..OffsitePurchaseTransaction::default()
    }
}

#[test]
fn verification_accepts_the_hmac_sha1_of_the_joined_values() {
    // Independently recomputed: HMAC-SHA1("secret", "100|USD").
    let signature = reference_hmac_sha1("secret", "100|USD");
    let transaction = offsite(
        100,
        "USD",
        SignedFields {
            fields: "amount currency_code".to_string(),
            algorithm: "sha1".to_string(),
            signature,
        },
    );

    assert!(transaction.is_valid_signature("secret").unwrap());
}

#[test]
fn mutating_either_signed_field_breaks_verification() {
    let signature = reference_hmac_sha1("secret", "100|USD");
    let signed = SignedFields {
        fields: "amount currency_code".to_string(),
        algorithm: "sha1".to_string(),
        signature,
    };

    let tampered_amount = offsite(200, "USD", signed.clone());
    assert!(!tampered_amount.is_valid_signature("secret").unwrap());

    let tampered_currency = offsite(100, "EUR", signed);
    assert!(!tampered_currency.is_valid_signature("secret").unwrap());
}

#[test]
fn field_order_in_the_envelope_is_significant() {
    // "USD|100" signs differently from "100|USD".
    let signature = reference_hmac_sha1("secret", "100|USD");
    let transaction = offsite(
        100,
        "USD",
        SignedFields {
            fields: "currency_code amount".to_string(),
            algorithm: "sha1".to_string(),
            signature,
        },
    );

    assert!(!transaction.is_valid_signature("secret").unwrap());
}

#[test]
fn sha256_envelopes_verify_too() {
    let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
    mac.update(b"100|USD");
    let signature = hex::encode(mac.finalize().into_bytes());

    let transaction = offsite(
        100,
        "USD",
        SignedFields {
            fields: "amount currency_code".to_string(),
            algorithm: "sha256".to_string(),
            signature,
        },
    );

    assert!(transaction.is_valid_signature("secret").unwrap());
}

#[test]
fn unsupported_algorithm_raises_instead_of_failing_open() {
    let transaction = offsite(
        100,
        "USD",
        SignedFields {
            fields: "amount currency_code".to_string(),
            algorithm: "md5".to_string(),
            signature: "deadbeef".to_string(),
        },
    );

    assert!(matches!(
        transaction.is_valid_signature("secret"),
        Err(Error::UnsupportedDigest(_))
    ));
}

#[test]
fn missing_signed_field_raises_instead_of_hashing_a_placeholder() {
    let transaction = offsite(
        100,
        "USD",
        SignedFields {
            fields: "amount order_id".to_string(),
            algorithm: "sha1".to_string(),
            signature: "deadbeef".to_string(),
        },
    );

    assert!(matches!(
        transaction.is_valid_signature("secret"),
        Err(Error::SignatureFieldMissing(_))
    ));
}
