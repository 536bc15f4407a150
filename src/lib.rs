pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::FsPodStore;
pub use config::ServerConfig;
pub use domain::model::{ContractType, Member, Pod, PodStats, Solution, Team};
pub use domain::ports::PodStore;
pub use server::{build_router, AppState, DirectorySnapshot};
pub use utils::error::{DirectoryError, Result};
