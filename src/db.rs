pub mod commitment_repo;
pub use commitment_repo::CommitmentRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
