//! Name inflection.
//!
//! Wire type names default to the pluralized model name, and deserialization
//! reverses the step with a singularized lookup. The suffix rules here cover
//! regular English nouns; vocabularies with irregular plurals can register
//! their own [`Inflector`], and [`IdentityInflector`] disables inflection
//! entirely for APIs whose type names already match their model names.

/// Pluralizes and singularizes model names.
pub trait Inflector: Send + Sync {
	/// Plural form of `word`.
	fn pluralize(&self, word: &str) -> String;
	/// Singular form of `word`.
	fn singularize(&self, word: &str) -> String;
}

/// Suffix-rule English inflection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInflector;

impl Inflector for DefaultInflector {
	fn pluralize(&self, word: &str) -> String {
		if word.is_empty() {
			return String::new();
		}
		if takes_es_suffix(word) {
			return format!("{word}es");
		}
		if let Some(stem) = word.strip_suffix('y') {
			if stem.chars().next_back().is_some_and(|c| !is_vowel(c)) {
				return format!("{stem}ies");
			}
		}
		format!("{word}s")
	}

	fn singularize(&self, word: &str) -> String {
		if let Some(stem) = word.strip_suffix("ies") {
			if !stem.is_empty() {
				return format!("{stem}y");
			}
		}
		// Strip "es" only when re-pluralizing the stem reproduces the input:
		// "boxes" came from "box", but "tunes" is "tune" plus a plain "s".
		if let Some(stem) = word.strip_suffix("es") {
			if !stem.is_empty() && self.pluralize(stem) == word {
				return stem.to_string();
			}
		}
		// A trailing "us" or "ss" is not a plural "s"; "status" and "boss"
		// pluralize to "statuses" and "bosses".
		if word.ends_with("us") || word.ends_with("ss") {
			return word.to_string();
		}
		if let Some(stem) = word.strip_suffix('s') {
			if !stem.is_empty() && self.pluralize(stem) == word {
				return stem.to_string();
			}
		}
		word.to_string()
	}
}

/// Inflector that returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityInflector;

impl Inflector for IdentityInflector {
	fn pluralize(&self, word: &str) -> String {
		word.to_string()
	}

	fn singularize(&self, word: &str) -> String {
		word.to_string()
	}
}

fn is_vowel(c: char) -> bool {
	matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn takes_es_suffix(word: &str) -> bool {
	word.ends_with('s')
		|| word.ends_with('x')
		|| word.ends_with('z')
		|| word.ends_with("ch")
		|| word.ends_with("sh")
}

/// Convert a kebab-case member name to camelCase.
///
/// A dash folds into the uppercased following letter only when that letter
/// is lowercase ascii; any other dash is kept verbatim. `snake-case-name`
/// becomes `snakeCaseName` while `already-1` stays `already-1`.
pub fn kebab_to_camel(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	let mut chars = name.chars().peekable();
	while let Some(ch) = chars.next() {
		if ch == '-' && chars.peek().is_some_and(|next| next.is_ascii_lowercase()) {
			if let Some(next) = chars.next() {
				out.push(next.to_ascii_uppercase());
			}
		} else {
			out.push(ch);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	// ==========================================================================
	// Pluralization tests
	// ==========================================================================

	#[rstest]
	#[case("product", "products")]
	#[case("order", "orders")]
	#[case("category", "categories")]
	#[case("status", "statuses")]
	#[case("box", "boxes")]
	#[case("batch", "batches")]
	#[case("dish", "dishes")]
	#[case("day", "days")]
	#[case("line-item", "line-items")]
	fn test_pluralize(#[case] singular: &str, #[case] plural: &str) {
		assert_eq!(DefaultInflector.pluralize(singular), plural);
	}

	#[rstest]
	#[case("products", "product")]
	#[case("orders", "order")]
	#[case("categories", "category")]
	#[case("statuses", "status")]
	#[case("bosses", "boss")]
	#[case("boxes", "box")]
	#[case("tunes", "tune")]
	#[case("line-items", "line-item")]
	#[case("subtotal", "subtotal")]
	fn test_singularize(#[case] plural: &str, #[case] singular: &str) {
		assert_eq!(DefaultInflector.singularize(plural), singular);
	}

	#[test]
	fn test_singularize_keeps_non_plural_s_words() {
		// Singular words ending in "s" must come back unchanged.
		assert_eq!(DefaultInflector.singularize("status"), "status");
		assert_eq!(DefaultInflector.singularize("bus"), "bus");
		assert_eq!(DefaultInflector.singularize("boss"), "boss");
	}

	#[test]
	fn test_empty_word() {
		assert_eq!(DefaultInflector.pluralize(""), "");
		assert_eq!(DefaultInflector.singularize(""), "");
	}

	#[test]
	fn test_identity_inflector() {
		assert_eq!(IdentityInflector.pluralize("product"), "product");
		assert_eq!(IdentityInflector.singularize("products"), "products");
	}

	// ==========================================================================
	// Kebab-case tests
	// ==========================================================================

	#[rstest]
	#[case("snake-case-description", "snakeCaseDescription")]
	#[case("first-name", "firstName")]
	#[case("title", "title")]
	#[case("alreadyCamel", "alreadyCamel")]
	#[case("trailing-", "trailing-")]
	#[case("dash-1", "dash-1")]
	#[case("double--dash", "double-Dash")]
	fn test_kebab_to_camel(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(kebab_to_camel(input), expected);
	}
}
