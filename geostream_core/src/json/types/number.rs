//! `From` implementations to create `JsonValue::Number` from Rust numeric types.

use super::JsonValue;

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

/// Implement `From<Number>` for `JsonValue` for types with lossless f64 conversion.
macro_rules! impl_from_number_lossless {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(f64::from(input))
				}
			}
		)+
	};
}

/// Implement `From<Number>` for `JsonValue` for types without lossless f64 conversion.
macro_rules! impl_from_number_lossy {
	($($t:ty),+ $(,)?) => {
		$(
			#[allow(clippy::cast_precision_loss)]
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(input as f64)
				}
			}
		)+
	};
}

impl_from_number_lossless!(f32, u8, u16, u32, i8, i16, i32);
impl_from_number_lossy!(u64, usize, i64, isize);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(JsonValue::from(0u8), 0.0)]
	#[case(JsonValue::from(65535u16), 65535.0)]
	#[case(JsonValue::from(-128i8), -128.0)]
	#[case(JsonValue::from(-1_000_000_000i32), -1_000_000_000.0)]
	#[case(JsonValue::from(3.5f32), 3.5)]
	#[case(JsonValue::from(9_007_199_254_740_991u64), 9_007_199_254_740_991.0)]
	#[case(JsonValue::from(-4_000_000_000i64), -4_000_000_000.0)]
	#[case(JsonValue::from(123_456usize), 123_456.0)]
	fn from_number(#[case] value: JsonValue, #[case] expected: f64) {
		assert_eq!(value, JsonValue::Number(expected));
	}
}
