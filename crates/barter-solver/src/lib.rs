mod chain_solver;
mod graph;
mod params;

pub use chain_solver::{ChainSolution, ChainSolver, SearchDiagnostics};
pub use graph::OfferGraph;
pub use params::SolverParams;
