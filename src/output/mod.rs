//! Writing the master patient list.
//!
//! The list is plain UTF-8 text: a block of `#` comment lines with
//! provenance (generation time, counts, source folders) followed by one
//! patient number per line in ascending order.

pub mod emitter;
