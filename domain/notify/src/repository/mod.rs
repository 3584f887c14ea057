mod notification;

pub use notification::NotificationRepo;
