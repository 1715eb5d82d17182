pub mod cors;
pub mod natural;
pub mod response;
