//! Containment of caller-supplied remote paths and upload file names

mod file_name;
mod path;

pub use file_name::sanitize_file_name;
pub use path::PathSandbox;
