//! Formatting prelude for convenient imports.
//!
//! Re-exports the types most templates need in one line:
//!
//! ```rust
//! use zerofmt::prelude::*;
//!
//! let args: ArgList = ["World"].into_iter().collect();
//! let mut fmt = Engine::new();
//! fmt.setup("Hello {0}!").args(&args);
//! assert_eq!(fmt.render(), "Hello World!");
//! ```

pub use crate::{
    ArgList, ArgValue, Decimals, Engine, FormatError, Output, StrView, TimerStyle, ViewMap,
};
