//! The built-in resolution strategies.
//!
//! Each submodule implements one naming convention behind the common
//! [`crate::AutoloadStrategy`] contract. They share the identifier parser
//! in [`crate::ident`] and the prefix table in [`crate::strategy`] by
//! composition; there is no inheritance-style layering between them.

pub mod fixed;
pub mod pear;
pub mod psr0;
pub mod psr4;
pub mod recursive;

pub use fixed::FixedStrategy;
pub use pear::PearStrategy;
pub use psr0::Psr0Strategy;
pub use psr4::Psr4Strategy;
pub use recursive::RecursiveStrategy;
