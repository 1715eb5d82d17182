//! Headless chapter viewer.
//!
//! [`state::reduce`] is the whole navigation logic as a pure function of
//! `(state, action)`. [`controller::Viewer`] owns one state value, runs the
//! fetches that transitions ask for against a [`source::DataSource`], and feeds
//! the completions back in. [`view::render`] turns a state into what a front
//! end shows.

pub mod controller;
pub mod query;
pub mod source;
pub mod state;
pub mod view;
