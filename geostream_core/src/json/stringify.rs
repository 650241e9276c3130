use super::JsonValue;

/// Compact serialization without whitespace.
pub fn stringify(json: &JsonValue) -> String {
	match json {
		JsonValue::String(s) => format!("\"{}\"", escape_json_string(s)),
		JsonValue::Number(n) => stringify_number(*n),
		JsonValue::Boolean(b) => b.to_string(),
		JsonValue::Null => String::from("null"),
		JsonValue::Array(arr) => arr.stringify(),
		JsonValue::Object(obj) => obj.stringify(),
	}
}

/// JSON has no literal for NaN or infinity; they are written as `null`.
fn stringify_number(n: f64) -> String {
	if n.is_finite() {
		n.to_string()
	} else {
		String::from("null")
	}
}

pub fn escape_json_string(input: &str) -> String {
	let mut output = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'"' => output.push_str("\\\""),
			'\\' => output.push_str("\\\\"),
			'\n' => output.push_str("\\n"),
			'\r' => output.push_str("\\r"),
			'\t' => output.push_str("\\t"),
			'\u{08}' => output.push_str("\\b"),
			'\u{0c}' => output.push_str("\\f"),
			c if c.is_control() => output.push_str(&format!("\\u{:04x}", c as u32)),
			c => output.push(c),
		}
	}
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::json::{JsonArray, JsonObject};
	use rstest::rstest;

	#[rstest]
	#[case(JsonValue::from("Hello, World!"), "\"Hello, World!\"")]
	#[case(JsonValue::from(42), "42")]
	#[case(JsonValue::from(-1.5), "-1.5")]
	#[case(JsonValue::from(0.0), "0")]
	#[case(JsonValue::from(true), "true")]
	#[case(JsonValue::Null, "null")]
	#[case(JsonValue::from(f64::NAN), "null")]
	#[case(JsonValue::from(f64::INFINITY), "null")]
	fn primitives(#[case] value: JsonValue, #[case] expected: &str) {
		assert_eq!(stringify(&value), expected);
	}

	#[test]
	fn special_characters() {
		let json = JsonValue::from("Line1\nLine2\rTab\tBackslash\\");
		assert_eq!(stringify(&json), "\"Line1\\nLine2\\rTab\\tBackslash\\\\\"");

		let json = JsonValue::from("Hello \"World\"");
		assert_eq!(stringify(&json), "\"Hello \\\"World\\\"\"");

		let json = JsonValue::from("bell\u{07}");
		assert_eq!(stringify(&json), "\"bell\\u0007\"");
	}

	#[test]
	fn unicode_is_kept() {
		assert_eq!(stringify(&JsonValue::from("Zürich 🌍")), "\"Zürich 🌍\"");
	}

	#[test]
	fn nested() {
		let mut object = JsonObject::new();
		object.set("list", JsonArray::from(vec![1, 2]));
		object.set("name", "x");
		object.set("none", None::<f64>);
		assert_eq!(stringify(&JsonValue::from(object)), r#"{"list":[1,2],"name":"x","none":null}"#);
	}
}
