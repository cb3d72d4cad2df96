pub mod diver;
pub mod error;
pub mod game;
pub mod graphs;
pub mod queue;
pub mod search;
pub mod sewer;
pub mod utility;
