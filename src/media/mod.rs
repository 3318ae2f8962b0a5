/// Media handling module
///
/// This module covers everything between "the user picked a file" and
/// "we have a payload ready for the enhancement call":
/// - Media type and size policy checks (validate.rs)
/// - Base64 data URI encoding and decoding (encode.rs)

pub mod encode;
pub mod validate;
