//! Secret reference synchronization between a pipeline and its config file

pub mod classifier;
pub mod document;
pub mod merge;
pub mod sync;

pub use classifier::{is_hard_coded, is_hard_coded_value, CRN_PREFIX, VAULT_PREFIX};
pub use document::{load_document, parse_document, render_document, write_document, IndentStyle};
pub use merge::{merge_pipeline_values, SyncReport};
pub use sync::SecretSynchronizer;
