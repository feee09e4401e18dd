//! Client side of the CMS REST API.

pub use client::*;
pub use endpoints::*;
pub use token::*;

mod client;
mod endpoints;
mod token;
