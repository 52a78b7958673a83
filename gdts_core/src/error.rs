use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GdtsError {
	#[error(transparent)]
	#[diagnostic(code(gdts::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(gdts::config_parse),
		help("check that gdts.toml is valid TOML with [naming] and/or [docs] sections")
	)]
	ConfigParse(String),

	#[error("failed to load public name list `{path}`: {reason}")]
	#[diagnostic(
		code(gdts::public_names),
		help("the public name list must be a JSON array of strings, e.g. `[\"_get_property_list\"]`")
	)]
	PublicNames { path: String, reason: String },
}

pub type GdtsResult<T> = Result<T, GdtsError>;
