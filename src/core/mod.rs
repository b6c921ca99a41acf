pub mod message;
pub mod monitor;
pub mod policy;

pub use crate::domain::model::{Classification, ConnectionEvent, EventKind, Notification, Outcome};
pub use crate::domain::ports::{LinkController, Notifier};
pub use crate::utils::error::Result;
pub use monitor::NodeMonitor;
pub use policy::classify;
