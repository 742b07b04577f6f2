pub mod factory;
pub mod registry;

pub use factory::TransactionFactory;
pub use registry::VariantRegistry;
