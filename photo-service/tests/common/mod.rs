// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod memory_storage;
pub use memory_storage::*;
mod multipart;
pub use multipart::*;
mod test_setup;
pub use test_setup::*;
mod utils;
pub use utils::*;
