mod context;
pub use context::InflationContext;

mod engine;
pub use engine::TreeInflater;

mod entity;
pub use entity::{downcast, entity, Entity};

mod inflater;
pub use inflater::{inflater, wirer, EntityInflater, RelationWirer};
