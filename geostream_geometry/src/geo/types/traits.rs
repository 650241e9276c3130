use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// Common interface of all geometric primitives.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Converts the geometry into a GeoJSON `coordinates` value.
	/// Optionally rounds coordinate values to the given number of decimals.
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue;

	/// Compute the bounding box of this geometry.
	///
	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` if the geometry has no coordinates.
	fn compute_bounds(&self) -> Option<[f64; 4]>;
}

/// Represents composite geometries that are collections of simpler elements.
/// For example, a polygon is made of rings, and a multipolygon is made of polygons.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	/// Creates a new, empty composite geometry.
	fn new() -> Self;

	/// Returns an immutable reference to the inner collection of elements.
	fn as_vec(&self) -> &Vec<Item>;

	/// Returns a mutable reference to the inner collection of elements.
	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	/// Consumes the composite geometry and returns the inner collection of elements.
	fn into_inner(self) -> Vec<Item>;

	/// Checks whether the composite geometry contains no elements.
	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	/// Returns the number of elements contained in the composite geometry.
	fn len(&self) -> usize {
		self.as_vec().len()
	}

	/// Adds a new element to the composite geometry.
	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}
}

/// Merges bounding boxes, ignoring `None` entries.
pub fn merge_bounds(bounds: impl IntoIterator<Item = Option<[f64; 4]>>) -> Option<[f64; 4]> {
	bounds.into_iter().flatten().reduce(|a, b| {
		[
			a[0].min(b[0]),
			a[1].min(b[1]),
			a[2].max(b[2]),
			a[3].max(b[3]),
		]
	})
}
