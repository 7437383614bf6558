#![deny(unused_must_use)]
#![forbid(unsafe_code)]
// Don't allow dbg! prints in release.
#![cfg_attr(not(debug_assertions), deny(clippy::dbg_macro))]

pub use err::{DeserializationError, FlpError};
pub use event_table::{EventKind, kind_of};
pub use flp_event::{FlpEvent, encode_text_payload};
pub use flp_file_header::FlpFileHeader;
pub use flp_parser::{FlpFile, UNKNOWN_VERSION, parse};
pub use flp_patch::{EventPatch, patch};
pub use flp_writer::serialize;

pub mod err;
pub mod event_table;
pub mod json_output;
pub mod plugin_data;
pub mod project;

mod flp_event;
mod flp_file_header;
mod flp_parser;
mod flp_patch;
mod flp_writer;
mod utils;

/// Offset within the event stream (relative to the start of the event data).
pub type StreamOffset = u64;

// For tests, we only initialize logging once.
#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}

// Cannot use `cfg(test)` here since `rustdoc` won't look at it.
#[cfg(debug_assertions)]
mod test_readme {
    macro_rules! calculated_doc {
        ($doc:expr, $id:ident) => {
            #[doc = $doc]
            enum $id {}
        };
    }

    calculated_doc!(include_str!("../README.md"), _DoctestReadme);
}
