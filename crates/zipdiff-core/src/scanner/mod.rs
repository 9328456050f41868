mod walk;

pub use walk::{collect_side, relative_key, CollectedSide};
