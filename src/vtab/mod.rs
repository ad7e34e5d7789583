//! Virtual table runtime
//!
//! Generic contracts shared by every generator table:
//! - tagged [`Value`] crossing the host boundary
//! - positional [`TableArgs`]
//! - [`VirtualTable`] / [`VirtualCursor`] lifecycle
//! - composable cursor bookkeeping ([`CursorState`], [`Bounds`])
//! - an in-process host ([`HostQuery`]) that drives the full negotiation

mod args;
mod cursor;
mod host;
mod table;
mod value;

pub use args::{unquote, TableArgs};
pub use cursor::{Bounds, CursorState};
pub use host::{evaluate, HostConstraint, HostQuery};
pub use table::{read_row, Row, VirtualCursor, VirtualTable};
pub use value::Value;
