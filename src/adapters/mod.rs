// Adapters layer: concrete implementations for external systems.

pub mod asterisk;
pub mod node_db;
pub mod pushover;

pub use asterisk::AsteriskLink;
pub use node_db::NodeDatabase;
pub use pushover::PushoverNotifier;
