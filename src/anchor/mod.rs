mod builder;
mod metadata;

pub use builder::{AnchorBuilder, AnchorReceipt};
pub use metadata::{AnchorMetadata, RESERVED_METADATA_LABEL};
