//! # Fact Graph Model
//!
//! Clean DTOs for the entity/relation graph. These types cross every
//! boundary: store ↔ query ↔ plasticity ↔ codec.
//!
//! Design rule: this module is pure data — no I/O, no clocks, no state.

pub mod entity;
pub mod relation;
pub mod value;
pub mod property_map;

pub use entity::{Entity, EntityId};
pub use relation::Relation;
pub use value::Value;
pub use property_map::PropertyMap;
