//! Helper functions shared by the loader, the generator and templates

mod date;
mod url;

pub use date::*;
pub use url::*;
