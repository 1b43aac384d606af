//! Payment record entities.

pub mod model;
pub mod status;

pub use model::{NewPayment, Payment, PaymentView, Refund};
pub use status::PaymentRecordStatus;
