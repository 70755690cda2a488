mod legacy;
mod merge;
mod normalize;

pub use legacy::upgrade_legacy_visibility;
pub use merge::{resolve, resolve_str};
pub use normalize::normalize_ids;
