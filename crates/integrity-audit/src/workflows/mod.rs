pub mod audit;
pub mod model;
