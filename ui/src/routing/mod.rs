//! Route table, resolvers/guards and the navigation state machine.

pub mod navigator;
pub mod redirect;
pub mod resolve;
pub mod table;

pub use navigator::{ActiveRoute, NavigationOutcome, NavigationPhase, Navigator, ResolvedData};
pub use resolve::{GuardDecision, ResolvedValue, ResolverRegistry};
pub use table::{RouteMatch, RouteTable, ViewTarget};
