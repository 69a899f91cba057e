pub mod clip;
pub mod decor;
pub mod filter;
pub mod shape;
pub mod texture;
