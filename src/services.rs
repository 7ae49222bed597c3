pub mod classification;
pub mod summary;
pub mod reminders;

pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod notification_service;
pub use notification_service::NotificationService;
pub mod bot_service;
pub use bot_service::BotService;
pub mod telegram;
pub use telegram::TelegramClient;
pub mod scheduler;
