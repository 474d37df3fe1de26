//! Spinwheel: the templating and scoring core behind an outreach campaign
//! composer.
//!
//! Two independent engines, both pure and synchronous:
//! - [`spintax`]: parse, count, segment, sample, and fold `{a/b|c}` templates
//! - [`risk`]: score sending accounts and gate a launch on the worst one
//!
//! [`config`] and [`logging`] serve the `spinwheel` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod risk;
pub mod spintax;
