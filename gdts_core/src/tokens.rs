use std::fmt::Display;

/// The kind of member a cross-reference tag points at, e.g. the `method` in
/// `[method get_name]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	Method,
	Member,
	Signal,
	Constant,
	Param,
	Enum,
	Annotation,
	ThemeItem,
	Constructor,
	Operator,
}

impl ReferenceKind {
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		let kind = match keyword {
			"method" => Self::Method,
			"member" => Self::Member,
			"signal" => Self::Signal,
			"constant" => Self::Constant,
			"param" => Self::Param,
			"enum" => Self::Enum,
			"annotation" => Self::Annotation,
			"theme_item" => Self::ThemeItem,
			"constructor" => Self::Constructor,
			"operator" => Self::Operator,
			_ => return None,
		};

		Some(kind)
	}

	pub fn keyword(self) -> &'static str {
		match self {
			Self::Method => "method",
			Self::Member => "member",
			Self::Signal => "signal",
			Self::Constant => "constant",
			Self::Param => "param",
			Self::Enum => "enum",
			Self::Annotation => "annotation",
			Self::ThemeItem => "theme_item",
			Self::Constructor => "constructor",
			Self::Operator => "operator",
		}
	}
}

/// A single markup construct recognized by the lexer.
///
/// Paired constructs are split into separate open and close tags so the
/// walker can decide whether a pair is balanced before rendering it. Every tag
/// displays as the exact source text it was lexed from, which is how literal
/// regions (fences, inline code, unbalanced tags) are reproduced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum Tag {
	/// Plain text without brackets or newlines.
	Text(String),
	/// `\n`
	Newline,
	/// A `[` that does not start a recognized tag.
	Bracket,
	/// `[b]`
	BoldOpen,
	/// `[/b]`
	BoldClose,
	/// `[i]`
	ItalicOpen,
	/// `[/i]`
	ItalicClose,
	/// `[code]`
	CodeOpen,
	/// `[/code]`
	CodeClose,
	/// `[kbd]`
	KeyOpen,
	/// `[/kbd]`
	KeyClose,
	/// `[codeblock]` or `[codeblock lang=text]`. `source` keeps the original
	/// spelling.
	FenceOpen {
		language: Option<String>,
		source: String,
	},
	/// `[/codeblock]`
	FenceClose,
	/// A markdown fence already present in the source, e.g. `` ```gdscript ``.
	/// The same tag opens and closes the region.
	RawFence {
		language: Option<String>,
		source: String,
	},
	/// `[codeblocks]`
	ContainerOpen,
	/// `[/codeblocks]`
	ContainerClose,
	/// `[gdscript]`, `[csharp]`
	LanguageOpen(String),
	/// `[/gdscript]`, `[/csharp]`
	LanguageClose(String),
	/// `[url]` or `[url=target]`
	LinkOpen { target: Option<String> },
	/// `[/url]`
	LinkClose,
	/// `[method name]`, `[member name]`, ...
	Reference { kind: ReferenceKind, name: String },
	/// `[Vector2]`, `[Node.ProcessMode]`, `[@GlobalScope]`
	TypeReference(String),
	/// `[br]`
	LineBreak,
	/// `[lb]`
	LeftBracket,
	/// `[rb]`
	RightBracket,
}

impl Tag {
	/// Text this tag stands for inside a literal region such as inline code or
	/// a fence. Only the bracket escapes are resolved; everything else is kept
	/// as written.
	pub fn literal(&self) -> String {
		match self {
			Tag::LeftBracket => "[".to_string(),
			Tag::RightBracket => "]".to_string(),
			other => other.to_string(),
		}
	}

	/// Returns true for newlines and whitespace-only text.
	pub fn is_blank(&self) -> bool {
		match self {
			Tag::Newline => true,
			Tag::Text(text) => text.trim().is_empty(),
			_ => false,
		}
	}
}

impl Display for Tag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Tag::Text(text) => write!(f, "{text}"),
			Tag::Newline => writeln!(f),
			Tag::Bracket => write!(f, "["),
			Tag::BoldOpen => write!(f, "[b]"),
			Tag::BoldClose => write!(f, "[/b]"),
			Tag::ItalicOpen => write!(f, "[i]"),
			Tag::ItalicClose => write!(f, "[/i]"),
			Tag::CodeOpen => write!(f, "[code]"),
			Tag::CodeClose => write!(f, "[/code]"),
			Tag::KeyOpen => write!(f, "[kbd]"),
			Tag::KeyClose => write!(f, "[/kbd]"),
			Tag::FenceOpen { source, .. } | Tag::RawFence { source, .. } => write!(f, "{source}"),
			Tag::FenceClose => write!(f, "[/codeblock]"),
			Tag::ContainerOpen => write!(f, "[codeblocks]"),
			Tag::ContainerClose => write!(f, "[/codeblocks]"),
			Tag::LanguageOpen(language) => write!(f, "[{language}]"),
			Tag::LanguageClose(language) => write!(f, "[/{language}]"),
			Tag::LinkOpen { target: None } => write!(f, "[url]"),
			Tag::LinkOpen {
				target: Some(target),
			} => write!(f, "[url={target}]"),
			Tag::LinkClose => write!(f, "[/url]"),
			Tag::Reference { kind, name } => write!(f, "[{} {name}]", kind.keyword()),
			Tag::TypeReference(name) => write!(f, "[{name}]"),
			Tag::LineBreak => write!(f, "[br]"),
			Tag::LeftBracket => write!(f, "[lb]"),
			Tag::RightBracket => write!(f, "[rb]"),
		}
	}
}
