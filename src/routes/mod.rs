pub mod assets;
pub mod comics;
