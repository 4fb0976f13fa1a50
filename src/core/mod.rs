pub mod discovery;
pub mod module;

pub use discovery::ModuleDiscovery;
pub use module::{ModuleInfoAggregator, ModuleRecord};
