pub mod cascade;
pub mod dto;
pub mod error;
pub mod placements;
pub mod purge;
pub mod query;
pub mod scoring;
pub mod settlement;

pub use cascade::*;
pub use placements::*;
pub use purge::*;
pub use query::*;
pub use scoring::*;
pub use settlement::*;

pub use sea_orm;
