//! Storage Module
//!
//! Record files on disk, one per record.
//!
//! ## Responsibilities
//! - Lay out `files/<table>/<content_address>`
//! - Strict-insert writes for `create`, overwriting writes for `update`
//! - Encode and decode record bodies as JSON or raw text
//!
//! ## Layout
//! ```text
//! <root>/files/
//! ├── users/
//! │   ├── 2bd806c9...6e90     (sha256("alice"))
//! │   └── 81b637d8...8ce9     (sha256("bob"))
//! └── posts/
//!     └── 2bd806c9...6e90     (same name, different table)
//! ```

mod payload;
mod file_store;

pub use payload::{Encoding, Payload};
pub use file_store::FileStore;
