pub mod aggregator;
pub mod loader;
pub mod renderer;
pub mod repair;

pub use crate::domain::model::{ContractType, Member, Pod, PodStats, Solution, Team};
pub use crate::domain::ports::PodStore;
pub use crate::utils::error::Result;
