//! A small JSON value model with compact and pretty serializers.
//!
//! Only the writing side is needed here: feature collections are assembled as `JsonValue`
//! trees and serialized in one pass when a layer is flushed.

mod stringify;
mod types;

pub use stringify::*;
pub use types::{JsonArray, JsonObject, JsonValue};
