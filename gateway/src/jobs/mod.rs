pub mod notify;

pub use notify::{NotificationFanout, NotificationJob};
