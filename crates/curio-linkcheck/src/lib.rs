//! # curio-linkcheck
//!
//! Finds dead links among the URLs of a catalog (software links and license
//! pages). Each distinct URL is fetched once with a small `Range` request;
//! 200 and 206 count as alive, anything else or a transport error as dead.

mod checker;
mod error;
mod targets;

pub use checker::{CheckReport, DeadLink, UrlChecker};
pub use error::LinkCheckError;
