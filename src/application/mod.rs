// Application layer - State reconciliation and command routing
pub mod control_gateway;
pub mod controller;
pub mod dispatcher;
pub mod feed;
