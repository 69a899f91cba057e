pub mod controller;
pub mod layout;
pub mod media;
pub mod probe;
