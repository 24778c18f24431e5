pub mod classify;
pub mod weights;
