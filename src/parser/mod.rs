pub mod action_block;
pub mod checksum;

pub use action_block::{extract_apply_action, find_structured_block, ExtractionError, StructuredBlock};
pub use checksum::content_checksum;
