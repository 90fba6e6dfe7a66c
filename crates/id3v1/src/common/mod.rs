//! Types shared by all tag readers

pub mod sink;
pub mod source;
pub mod tagtype;
