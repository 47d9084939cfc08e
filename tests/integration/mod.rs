//! Integration tests driving the codecs through the public API.

pub mod envelopes;
pub mod json_codec;
pub mod round_trip;
pub mod typed_resources;
