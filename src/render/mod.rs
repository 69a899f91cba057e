pub mod compile;
pub mod editor;
pub mod fingerprint;
pub mod viewer;
