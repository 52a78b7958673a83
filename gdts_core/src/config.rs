use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;
use tracing::warn;

use crate::GdtsError;
use crate::GdtsResult;
use crate::PublicNames;
use crate::markup::DEFAULT_DOCS_URL;
use crate::markup::DEFAULT_LANGUAGE;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["gdts.toml", ".gdts.toml", ".config/gdts.toml"];

/// Configuration loaded from a `gdts.toml` file.
///
/// ```toml
/// [naming]
/// public_underscore = ["_get_property_list"]
/// public_underscore_file = "public-underscore.json"
///
/// [docs]
/// language = "gdscript"
/// base_url = "https://docs.godotengine.org/en/stable"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct GdtsConfig {
	/// Identifier normalization settings.
	#[serde(default)]
	pub naming: NamingConfig,
	/// Documentation markup settings.
	#[serde(default)]
	pub docs: DocsConfig,
}

/// Names that keep their leading underscore and stay public.
///
/// Entries can be listed inline, read from a JSON array file, or both. The
/// file is optional: when it does not exist the inline list is used on its
/// own.
#[derive(Debug, Default, Deserialize)]
pub struct NamingConfig {
	#[serde(default)]
	pub public_underscore: Vec<String>,
	/// Path, relative to the project root, of a JSON array of names.
	#[serde(default)]
	pub public_underscore_file: Option<PathBuf>,
}

/// Settings for transpiling documentation markup.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
	/// Language tag for fenced blocks and the only language kept from
	/// multi-language code samples.
	#[serde(default = "default_language")]
	pub language: String,
	/// Replacement for the `$DOCS_URL` placeholder.
	#[serde(default = "default_base_url")]
	pub base_url: String,
}

impl Default for DocsConfig {
	fn default() -> Self {
		Self {
			language: default_language(),
			base_url: default_base_url(),
		}
	}
}

fn default_language() -> String {
	DEFAULT_LANGUAGE.to_string()
}

fn default_base_url() -> String {
	DEFAULT_DOCS_URL.to_string()
}

impl GdtsConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> GdtsResult<Option<GdtsConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			debug!(root = %root.display(), "no config file found");
			return Ok(None);
		};

		debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config: GdtsConfig =
			toml::from_str(&content).map_err(|e| GdtsError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Load the config, falling back to the defaults when the file is missing
	/// or cannot be read. Failures are logged, never returned.
	pub fn load_or_default(root: &Path) -> GdtsConfig {
		match Self::load(root) {
			Ok(config) => config.unwrap_or_default(),
			Err(error) => {
				warn!(%error, "ignoring unusable config, using defaults");
				GdtsConfig::default()
			}
		}
	}
}

impl NamingConfig {
	/// Collect the inline names and the contents of `public_underscore_file`.
	/// A missing file contributes nothing; a malformed one is an error.
	pub fn public_names(&self, root: &Path) -> GdtsResult<PublicNames> {
		let mut names: PublicNames = self.public_underscore.iter().cloned().collect();

		if let Some(file) = &self.public_underscore_file {
			names.extend(PublicNames::load(&root.join(file))?);
		}

		Ok(names)
	}
}
