use geostream_core::json::JsonValue;
use std::fmt::Debug;

/// A coordinate pair in (x = longitude, y = latitude) order.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	/// Creates coordinates from longitude and latitude.
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	/// Returns the x component (longitude).
	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	/// Returns the y component (latitude).
	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	/// Returns `[x, y]` as JSON, rounded to `precision` decimals when given.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonValue {
		if let Some(prec) = precision {
			let factor = 10f64.powi(i32::from(prec));
			let x = (self.0[0] * factor).round() / factor;
			let y = (self.0[1] * factor).round() / factor;
			JsonValue::from([x, y])
		} else {
			JsonValue::from(&self.0)
		}
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates([value[0].into(), value[1].into()])
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new(13.404954, 52.520008);
		assert_eq!(c.x(), 13.404954);
		assert_eq!(c.y(), 52.520008);
	}

	#[test]
	fn rounding_keeps_close_values() {
		let JsonValue::Array(array) = Coordinates::new(0.1 + 0.2, -7.000_000_4).to_json(Some(6)) else {
			panic!("coordinates must serialize as an array")
		};
		let JsonValue::Number(x) = array.0[0] else { panic!() };
		let JsonValue::Number(y) = array.0[1] else { panic!() };
		approx::assert_abs_diff_eq!(x, 0.3, epsilon = 1e-12);
		approx::assert_abs_diff_eq!(y, -7.0, epsilon = 1e-12);
	}

	#[test]
	fn debug_formats_like_array() {
		let c = Coordinates::new(1.0, 2.0);
		assert_eq!(format!("{c:?}"), "[1.0, 2.0]");
	}

	#[test]
	fn to_json_without_precision() {
		let c = Coordinates::new(1.23456789, 9.87654321);
		assert_eq!(c.to_json(None), JsonValue::from([1.23456789, 9.87654321]));
	}

	#[rstest]
	#[case(0, [1.0, 2.0])]
	#[case(1, [1.2, 2.3])]
	#[case(3, [1.235, 2.346])]
	fn to_json_with_precision(#[case] prec: u8, #[case] expected: [f64; 2]) {
		let c = Coordinates::new(1.23456, 2.34567);
		assert_eq!(c.to_json(Some(prec)), JsonValue::from(expected));
	}

	#[test]
	fn conversions() {
		assert_eq!(Coordinates::from(&[3, 4]), Coordinates::new(3.0, 4.0));
		assert_eq!(Coordinates::from((5.0, 6.0)), Coordinates::new(5.0, 6.0));
		let arr: [f64; 2] = Coordinates::new(10.25, -20.5).into();
		assert_eq!(arr, [10.25, -20.5]);
	}
}
