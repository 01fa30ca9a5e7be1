pub mod batch;
pub mod campaign;
pub mod chain;
pub mod report;

pub use campaign::Campaign;
pub use chain::Chain;
pub use report::Report;
