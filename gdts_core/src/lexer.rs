use logos::Logos;

use crate::tokens::ReferenceKind;
use crate::tokens::Tag;

/// Raw tokens produced by logos for flat tokenization of documentation markup.
///
/// Every byte of the input is covered by exactly one variant, so the walker
/// can always reproduce the source text of anything it does not understand.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("\n")]
	Newline,
	#[regex(r"[^\[\n`]+")]
	Text,
	#[token("[")]
	Bracket,
	#[token("`")]
	Backtick,
	#[regex(r"```[A-Za-z0-9_+\-]*")]
	RawFence,
	#[token("[b]")]
	BoldOpen,
	#[token("[/b]")]
	BoldClose,
	#[token("[i]")]
	ItalicOpen,
	#[token("[/i]")]
	ItalicClose,
	#[token("[code]")]
	CodeOpen,
	#[token("[/code]")]
	CodeClose,
	#[token("[kbd]")]
	KeyOpen,
	#[token("[/kbd]")]
	KeyClose,
	#[regex(r"\[codeblock( [^\]\n]*)?\]")]
	FenceOpen,
	#[token("[/codeblock]")]
	FenceClose,
	#[token("[codeblocks]")]
	ContainerOpen,
	#[token("[/codeblocks]")]
	ContainerClose,
	#[regex(r"\[(gdscript|csharp)\]")]
	LanguageOpen,
	#[regex(r"\[/(gdscript|csharp)\]")]
	LanguageClose,
	#[regex(r"\[url(=[^\]\n]+)?\]")]
	LinkOpen,
	#[token("[/url]")]
	LinkClose,
	#[regex(
		r"\[(method|member|signal|constant|param|enum|annotation|theme_item|constructor|operator) [^\]\n]+\]"
	)]
	Reference,
	#[regex(r"\[@?[A-Z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)?\]")]
	TypeReference,
	#[token("[br]")]
	LineBreak,
	#[token("[lb]")]
	LeftBracket,
	#[token("[rb]")]
	RightBracket,
}

/// Tokenize documentation markup into a flat list of [`Tag`]s.
///
/// Adjacent text fragments are merged so the walker sees one `Text` per run
/// of plain characters.
pub fn tokenize(source: &str) -> Vec<Tag> {
	let mut tags: Vec<Tag> = Vec::new();

	for (result, span) in RawToken::lexer(source).spanned() {
		let slice = &source[span];
		let tag = match result {
			Ok(raw) => to_tag(raw, slice),
			Err(()) => Tag::Text(slice.to_string()),
		};

		match (tags.last_mut(), tag) {
			(Some(Tag::Text(previous)), Tag::Text(text)) => previous.push_str(&text),
			(_, tag) => tags.push(tag),
		}
	}

	tags
}

fn to_tag(raw: RawToken, slice: &str) -> Tag {
	match raw {
		RawToken::Newline => Tag::Newline,
		RawToken::Text | RawToken::Backtick => Tag::Text(slice.to_string()),
		RawToken::Bracket => Tag::Bracket,
		RawToken::RawFence => {
			Tag::RawFence {
				language: non_empty(slice.trim_start_matches('`')),
				source: slice.to_string(),
			}
		}
		RawToken::BoldOpen => Tag::BoldOpen,
		RawToken::BoldClose => Tag::BoldClose,
		RawToken::ItalicOpen => Tag::ItalicOpen,
		RawToken::ItalicClose => Tag::ItalicClose,
		RawToken::CodeOpen => Tag::CodeOpen,
		RawToken::CodeClose => Tag::CodeClose,
		RawToken::KeyOpen => Tag::KeyOpen,
		RawToken::KeyClose => Tag::KeyClose,
		RawToken::FenceOpen => {
			Tag::FenceOpen {
				language: fence_language(slice),
				source: slice.to_string(),
			}
		}
		RawToken::FenceClose => Tag::FenceClose,
		RawToken::ContainerOpen => Tag::ContainerOpen,
		RawToken::ContainerClose => Tag::ContainerClose,
		RawToken::LanguageOpen => Tag::LanguageOpen(inner(slice).to_string()),
		RawToken::LanguageClose => {
			Tag::LanguageClose(inner(slice).trim_start_matches('/').to_string())
		}
		RawToken::LinkOpen => {
			let target = inner(slice)
				.strip_prefix("url=")
				.and_then(|target| non_empty(target.trim()));
			Tag::LinkOpen { target }
		}
		RawToken::LinkClose => Tag::LinkClose,
		RawToken::Reference => {
			let (keyword, name) = inner(slice).split_once(' ').unwrap_or_default();
			match ReferenceKind::from_keyword(keyword) {
				Some(kind) => {
					Tag::Reference {
						kind,
						name: name.trim().to_string(),
					}
				}
				None => Tag::Text(slice.to_string()),
			}
		}
		RawToken::TypeReference => Tag::TypeReference(inner(slice).to_string()),
		RawToken::LineBreak => Tag::LineBreak,
		RawToken::LeftBracket => Tag::LeftBracket,
		RawToken::RightBracket => Tag::RightBracket,
	}
}

/// Strip the surrounding `[` and `]` from a tag slice.
fn inner(slice: &str) -> &str {
	slice
		.strip_prefix('[')
		.and_then(|rest| rest.strip_suffix(']'))
		.unwrap_or(slice)
}

/// Read the `lang=` attribute from a `[codeblock ...]` tag.
fn fence_language(slice: &str) -> Option<String> {
	inner(slice)
		.split_whitespace()
		.skip(1)
		.find_map(|attribute| attribute.strip_prefix("lang="))
		.and_then(|language| non_empty(language.trim_matches('"')))
}

fn non_empty(value: &str) -> Option<String> {
	if value.is_empty() {
		None
	} else {
		Some(value.to_string())
	}
}
