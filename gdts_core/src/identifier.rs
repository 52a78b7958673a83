use std::collections::HashSet;
use std::collections::hash_set;
use std::path::Path;

use derive_more::Deref;
use tracing::debug;
use tracing::trace;

use crate::GdtsError;
use crate::GdtsResult;
use crate::config::NamingConfig;

/// Words that cannot be used verbatim as identifiers in the generated
/// declarations. Includes the strict-mode restricted names.
pub const RESERVED_WORDS: &[&str] = &[
	"arguments",
	"await",
	"break",
	"case",
	"catch",
	"class",
	"const",
	"continue",
	"debugger",
	"default",
	"delete",
	"do",
	"else",
	"enum",
	"eval",
	"export",
	"extends",
	"false",
	"finally",
	"for",
	"function",
	"if",
	"implements",
	"import",
	"in",
	"instanceof",
	"interface",
	"let",
	"new",
	"null",
	"package",
	"private",
	"protected",
	"public",
	"return",
	"static",
	"super",
	"switch",
	"this",
	"throw",
	"true",
	"try",
	"typeof",
	"var",
	"void",
	"while",
	"with",
	"yield",
];

/// Engine lifecycle callbacks. These are overridden by user scripts, so they
/// stay public and keep their leading underscore.
pub const MAGIC_HOOKS: &[&str] = &[
	"_ready",
	"_process",
	"_physics_process",
	"_input",
	"_unhandled_input",
	"_unhandled_key_input",
	"_shortcut_input",
	"_gui_input",
	"_enter_tree",
	"_exit_tree",
	"_init",
	"_draw",
	"_notification",
	"_integrate_forces",
	"_get_configuration_warnings",
	"_to_string",
	"_get",
	"_set",
	"_get_property_list",
	"_property_can_revert",
	"_property_get_revert",
	"_validate_property",
];

pub fn is_reserved_word(name: &str) -> bool {
	RESERVED_WORDS.contains(&name)
}

pub fn is_magic_hook(name: &str) -> bool {
	MAGIC_HOOKS.contains(&name)
}

/// Names that keep their leading underscore and stay public even though the
/// naming convention marks them as internal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct PublicNames(HashSet<String>);

impl PublicNames {
	/// Parse a JSON array of strings.
	pub fn from_json_str(content: &str) -> GdtsResult<Self> {
		parse_public_names(content, "<string>")
	}

	/// Read a JSON array of strings from `path`. A file that does not exist is
	/// an empty list, not an error.
	pub fn load(path: &Path) -> GdtsResult<Self> {
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				debug!(path = %path.display(), "public name list not found, treating as empty");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(GdtsError::PublicNames {
					path: path.display().to_string(),
					reason: error.to_string(),
				});
			}
		};

		let names = parse_public_names(&content, &path.display().to_string())?;
		debug!(path = %path.display(), count = names.len(), "loaded public name list");

		Ok(names)
	}
}

fn parse_public_names(content: &str, path: &str) -> GdtsResult<PublicNames> {
	let names: Vec<String> = serde_json::from_str(content).map_err(|e| {
		GdtsError::PublicNames {
			path: path.to_string(),
			reason: e.to_string(),
		}
	})?;

	Ok(names.into_iter().collect())
}

impl FromIterator<String> for PublicNames {
	fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> FromIterator<&'a str> for PublicNames {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		Self(iter.into_iter().map(ToString::to_string).collect())
	}
}

impl Extend<String> for PublicNames {
	fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
		self.0.extend(iter);
	}
}

impl IntoIterator for PublicNames {
	type IntoIter = hash_set::IntoIter<String>;
	type Item = String;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Which visibility rule decided an identifier's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityRule {
	/// A lifecycle callback from [`MAGIC_HOOKS`]; public and unchanged.
	MagicHook,
	/// Listed in [`PublicNames`]; public and unchanged.
	AllowListed,
	/// Leading underscores were removed; private.
	Stripped,
	/// No rule applied; public and unchanged.
	Unchanged,
}

/// An emitted identifier together with its visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIdentifier {
	pub name: String,
	pub is_private: bool,
	pub rule: VisibilityRule,
}

impl NormalizedIdentifier {
	fn new(name: impl Into<String>, rule: VisibilityRule) -> Self {
		Self {
			name: name.into(),
			is_private: rule == VisibilityRule::Stripped,
			rule,
		}
	}
}

/// Decides visibility for raw engine names and turns them into legal
/// identifiers.
///
/// ```rust
/// use gdts_core::IdentifierNormalizer;
///
/// let normalizer = IdentifierNormalizer::default();
///
/// let hook = normalizer.normalize("_ready");
/// assert_eq!((hook.name.as_str(), hook.is_private), ("_ready", false));
///
/// let hidden = normalizer.normalize("__edit_get_state");
/// assert_eq!((hidden.name.as_str(), hidden.is_private), ("editGetState", true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentifierNormalizer {
	public_names: PublicNames,
}

impl IdentifierNormalizer {
	pub fn new(public_names: PublicNames) -> Self {
		Self { public_names }
	}

	/// Build a normalizer from the `[naming]` config section. `root` is the
	/// directory `public_underscore_file` is relative to.
	pub fn from_config(config: &NamingConfig, root: &Path) -> GdtsResult<Self> {
		Ok(Self::new(config.public_names(root)?))
	}

	pub fn public_names(&self) -> &PublicNames {
		&self.public_names
	}

	/// Decide whether `raw` is public or private. Only names with leading
	/// underscores that are neither magic hooks nor allow-listed become
	/// private, and they lose every leading underscore.
	pub fn privatize_if_needed(&self, raw: &str) -> NormalizedIdentifier {
		if is_magic_hook(raw) {
			return NormalizedIdentifier::new(raw, VisibilityRule::MagicHook);
		}

		if self.public_names.contains(raw) {
			return NormalizedIdentifier::new(raw, VisibilityRule::AllowListed);
		}

		if raw.starts_with('_') {
			return NormalizedIdentifier::new(raw.trim_start_matches('_'), VisibilityRule::Stripped);
		}

		NormalizedIdentifier::new(raw, VisibilityRule::Unchanged)
	}

	/// Decide visibility, then make the resulting name a legal identifier.
	/// Magic hooks and allow-listed names keep their spelling and only have
	/// illegal characters and keyword collisions fixed.
	pub fn normalize(&self, raw: &str) -> NormalizedIdentifier {
		let mut identifier = self.privatize_if_needed(raw);
		identifier.name = match identifier.rule {
			VisibilityRule::MagicHook | VisibilityRule::AllowListed => legalize(&identifier.name),
			VisibilityRule::Stripped | VisibilityRule::Unchanged => {
				sanitize_identifier(&identifier.name)
			}
		};
		trace!(raw, name = %identifier.name, rule = ?identifier.rule, "normalized identifier");

		identifier
	}
}

fn is_separator(c: char) -> bool {
	matches!(c, '/' | '\\' | ':' | '.') || c.is_whitespace()
}

/// Turn any string into a legal identifier.
///
/// Casing runs before illegal characters are replaced: path-like names are
/// split on their separators and joined as one camel-cased identifier,
/// everything else goes through [`to_camel`].
pub fn sanitize_identifier(raw: &str) -> String {
	let cased = if raw.contains(is_separator) {
		camel_segments(raw)
	} else {
		to_camel(raw)
	};

	legalize(&cased)
}

/// Join the segments of a path-like name, e.g. `physics/2d/default_gravity`
/// becomes `physics2dDefaultGravity`.
fn camel_segments(raw: &str) -> String {
	raw.split(is_separator)
		.filter(|segment| !segment.is_empty())
		.enumerate()
		.map(|(index, segment)| {
			let segment = to_camel(segment);
			if index == 0 {
				lower_first(&segment)
			} else {
				upper_first(&segment)
			}
		})
		.collect()
}

/// Convert underscore-separated words to camelCase.
///
/// Leading and trailing underscores are kept. Names without lowercase letters
/// (constants such as `NOTIFICATION_READY`) are returned unchanged.
///
/// ```rust
/// assert_eq!(gdts_core::to_camel("get_2d_vector"), "get2dVector");
/// ```
pub fn to_camel(name: &str) -> String {
	let body = name.trim_start_matches('_');
	let core = body.trim_end_matches('_');

	if !core.contains('_') || !core.chars().any(char::is_lowercase) {
		return name.to_string();
	}

	let mut result = String::with_capacity(name.len());
	result.push_str(&name[..name.len() - body.len()]);

	let mut upper_next = false;
	for c in core.chars() {
		if c == '_' {
			upper_next = true;
		} else if upper_next {
			result.extend(c.to_uppercase());
			upper_next = false;
		} else {
			result.push(c);
		}
	}

	result.push_str(&body[core.len()..]);
	result
}

fn lower_first(segment: &str) -> String {
	if !segment.chars().any(char::is_lowercase) {
		return segment.to_string();
	}

	let mut chars = segment.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn upper_first(segment: &str) -> String {
	let mut chars = segment.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Replace illegal characters, guard against a leading digit and
/// disambiguate reserved words. Never returns an empty string.
fn legalize(name: &str) -> String {
	let mut result: String = name
		.chars()
		.enumerate()
		.map(|(index, c)| {
			if c.is_ascii_alphanumeric() || c == '_' || (index == 0 && c == '$') {
				c
			} else {
				'_'
			}
		})
		.collect();

	if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
		result.insert(0, '_');
	}

	if is_reserved_word(&result) {
		result.push('_');
	}

	result
}

/// Returns true when `name` can be emitted verbatim as an identifier.
pub fn is_legal_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	(first.is_ascii_alphabetic() || first == '_' || first == '$')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		&& !is_reserved_word(name)
}
