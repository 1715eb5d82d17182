pub mod catalog;
pub mod sidecar;
pub mod snapshot;
