//! # zerofmt: allocation-frugal template formatting
//!
//! `zerofmt` renders templates containing literal text, `<name[=value]>`
//! markup tags, and `{0}` / `{identifier}` placeholders into a reusable
//! working buffer, substituting typed arguments and rewriting or dispatching
//! tags without intermediate string copies.
//!
//! ## Core Concepts
//!
//! - [`Engine`]: walks a template once and resolves placeholders and tags
//! - [`ArgList`] / [`ArgValue`]: typed positional arguments with change
//!   tracking, stored without boxing
//! - [`StrView`] / [`ViewMap`]: content-addressed views and zero-copy map
//!   lookups (re-exported from `zerofmt-view`)
//! - Tag resolution: a color map rewrites `<color=NAME>`, an alias map
//!   replaces whole tags with expansion text, processor callbacks take over
//!   anything else they claim; unmatched tags pass through verbatim
//! - Malformed syntax never fails a render; it degrades to literal output
//!
//! ## Quick Start
//!
//! ```rust
//! use zerofmt::{ArgList, Decimals, Engine};
//!
//! let mut args = ArgList::new();
//! args.push_str("disk")
//!     .push_float(93.75, Decimals::Fixed(1));
//!
//! let mut fmt = Engine::new();
//! fmt.setup("{0} usage: {1}%").args(&args);
//! assert_eq!(fmt.render(), "disk usage: 93.7%");
//! ```
//!
//! ## Tags and Maps
//!
//! ```rust
//! use zerofmt::{aliases_from_yaml, colors_from_yaml, Engine};
//!
//! let colors = colors_from_yaml("warn: \"#E5C07B\"\n").unwrap();
//! let aliases = aliases_from_yaml("b:\n  open: \"**\"\n  close: \"**\"\n").unwrap();
//!
//! let mut fmt = Engine::new();
//! fmt.setup("<b><color=warn>low space</color></b>")
//!     .colors(&colors)
//!     .aliases(&aliases);
//! assert_eq!(fmt.render(), "**<color=#E5C07B>low space</color>**");
//! ```
//!
//! ## Named Variables
//!
//! ```rust
//! use zerofmt::{Engine, Output, StrView};
//!
//! let resolver = |name: StrView<'_>, out: &mut Output<'_, '_>| {
//!     if name == "host" {
//!         out.append_str("db-01");
//!     }
//! };
//!
//! let mut fmt = Engine::new();
//! fmt.setup("connected to {host}").variables(&resolver);
//! assert_eq!(fmt.render(), "connected to db-01");
//! ```
//!
//! A single [`Engine`] is meant for single-threaded use; create one instance
//! per thread when rendering concurrently.

mod args;
mod engine;
mod error;
mod loader;
pub mod num;
pub mod prelude;
mod value;

pub use args::ArgList;
pub use engine::{Engine, Output, TagProcessor, VarResolver};
pub use error::{FormatError, Result};
pub use loader::{aliases_from_yaml, colors_from_yaml};
pub use value::{ArgValue, Decimals, TimerStyle};

// Re-export the view layer so downstream code needs only one dependency.
pub use zerofmt_view::{Backing, StrView, ViewError, ViewMap};
