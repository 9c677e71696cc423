// Domain layer - Pure data contracts
pub mod alert;
pub mod notification;
pub mod signal_history;
pub mod station;
