//! Cost data providers

pub mod cost_explorer;

pub use cost_explorer::CostExplorerProvider;
