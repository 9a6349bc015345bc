//! Text sanitization for values submitted through the settings form
//!
//! Applies the usual single-line text field rules:
//! - `<script>` and `<style>` elements are removed with their content
//! - remaining tags (`<` followed by a letter, `/` or `!`) are stripped,
//!   any other `<` becomes `&lt;`
//! - tabs, line breaks and runs of spaces collapse to one space
//! - percent-encoded octets (`%20`, `%3C`, ...) are removed
//! - control characters are dropped, the result is trimmed

use regex::Regex;

use crate::prelude::*;

const CONTENT_ELEMENTS: &[&str] = &["script", "style"];

fn regex(pattern: &str) -> ClResult<Regex> {
	Regex::new(pattern).map_err(|e| Error::Internal(format!("regex error: {}", e)))
}

pub fn sanitize_text_field(input: &str) -> ClResult<String> {
	let mut result: String =
		input.chars().filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r')).collect();

	if result.contains('<') {
		for element in CONTENT_ELEMENTS {
			let with_content = regex(&format!(r"(?is)<{}[^>]*>.*?</{}\s*>", element, element))?;
			result = with_content.replace_all(&result, "").into_owned();
		}

		let tags = regex(r"<[a-zA-Z/!][^>]*>")?;
		result = tags.replace_all(&result, "").into_owned();
		result = result.replace('<', "&lt;");
	}

	let whitespace = regex(r"[\r\n\t ]+")?;
	result = whitespace.replace_all(&result, " ").into_owned();

	let octets = regex(r"%[a-fA-F0-9]{2}")?;
	while octets.is_match(&result) {
		result = octets.replace_all(&result, "").into_owned();
	}
	result = whitespace.replace_all(&result, " ").into_owned();

	Ok(result.trim().to_string())
}

/// True when the value would pass through sanitization unchanged
pub fn is_sanitized(input: &str) -> ClResult<bool> {
	Ok(sanitize_text_field(input)? == input)
}


// vim: ts=4
