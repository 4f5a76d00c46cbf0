//! Data Transfer Objects for the workspace API
//!
//! Wire representations of the remote workspace's responses. Every
//! response carries a string `status` discriminator; it is parsed into
//! [`job::ApiStatus`], and any unrecognized value is a deserialization
//! error rather than a silent pass-through.

pub mod insights;
pub mod job;
