//! Payload validation for producer writes.

mod validation;
pub use validation::ProducerValidator;
