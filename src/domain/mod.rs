pub mod gateway_response;
pub mod payment_method;
pub mod signature;
pub mod transaction;
