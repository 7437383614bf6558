pub(crate) mod byte_cursor;
pub(crate) mod bytes;
pub(crate) mod utf16;
pub(crate) mod vli;
