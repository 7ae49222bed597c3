pub mod commitments;
pub mod dashboard;
pub mod jobs;
pub mod notifications;
pub mod payments;
pub mod telegram;
