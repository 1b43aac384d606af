//! Customer support content: notices, FAQs, newsletter subscriptions.

pub mod faq;
pub mod newsletter;
pub mod notice;

pub use faq::Faq;
pub use newsletter::NewsletterSubscription;
pub use notice::Notice;
