//! Host-side glue around [`infisweep_core`].
//!
//! A [`Session`] owns the live board and a viewport sized to the terminal widget, turns host input into
//! board moves, reads and writes the save file through a [`SaveStore`], and reports what happened as a
//! [`Signal`] plus a status line. Painting the [`CellStyle`]s it produces is left to the host.

pub use config::*;
pub use error::*;
pub use session::*;
pub use store::*;
pub use style::*;

mod config;
mod error;
mod session;
mod store;
mod style;
