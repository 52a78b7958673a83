use tracing::debug;
use tracing::trace;

use crate::comment::frame_comment;
use crate::config::DocsConfig;
use crate::lexer::tokenize;
use crate::tokens::Tag;

/// Placeholder used by the engine documentation for the documentation root.
pub const DOCS_URL_PLACEHOLDER: &str = "$DOCS_URL";
/// Documentation root substituted for [`DOCS_URL_PLACEHOLDER`] by default.
pub const DEFAULT_DOCS_URL: &str = "https://docs.godotengine.org/en/stable";
/// The only language whose code samples are kept by default.
pub const DEFAULT_LANGUAGE: &str = "gdscript";

/// Labels that mark the start of an admonition paragraph.
const ADMONITION_LABELS: &[&str] = &[
	"Note:",
	"Warning:",
	"Example:",
	"Tip:",
	"Deprecated:",
	"Experimental:",
];

const FENCE_DELIMITER: &str = "```";

/// Settings for [`MarkupTranspiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
	/// Language tag for `[codeblock]` fences and the only language retained
	/// from `[codeblocks]` containers.
	pub language: String,
	/// Replacement for every `$DOCS_URL` in the source.
	pub base_url: String,
}

impl Default for MarkupOptions {
	fn default() -> Self {
		Self {
			language: DEFAULT_LANGUAGE.to_string(),
			base_url: DEFAULT_DOCS_URL.to_string(),
		}
	}
}

impl From<&DocsConfig> for MarkupOptions {
	fn from(config: &DocsConfig) -> Self {
		Self {
			language: config.language.clone(),
			base_url: config.base_url.clone(),
		}
	}
}

/// Converts engine documentation markup into `/** ... */` comment blocks.
///
/// ```rust
/// use gdts_core::MarkupTranspiler;
///
/// let transpiler = MarkupTranspiler::default();
/// let comment = transpiler.transpile(&["[b]Note:[/b] see [method queue_free]."]);
///
/// assert_eq!(comment, "/**\n * **Note:** see `queue_free`.\n */");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkupTranspiler {
	options: MarkupOptions,
}

impl MarkupTranspiler {
	pub fn new(options: MarkupOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &MarkupOptions {
		&self.options
	}

	/// Transpile the lines of one documentation entry into a complete comment
	/// block. Unknown or unbalanced markup is kept as literal text.
	pub fn transpile<S: AsRef<str>>(&self, lines: &[S]) -> String {
		let lines = self.transpile_lines(lines);
		frame_comment(&lines)
	}

	/// Like [`transpile`](Self::transpile) but returns the normalized content
	/// lines without the comment framing.
	pub fn transpile_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
		let joined = lines
			.iter()
			.map(AsRef::as_ref)
			.collect::<Vec<_>>()
			.join("\n");
		let source = joined.replace(DOCS_URL_PLACEHOLDER, &self.options.base_url);
		let tags = tokenize(&source);
		let rendered = TagWalker::new(&tags, &self.options).render();

		normalize_lines(&rendered)
	}
}

/// Transpile documentation lines with the default [`MarkupOptions`].
pub fn transpile<S: AsRef<str>>(lines: &[S]) -> String {
	MarkupTranspiler::default().transpile(lines)
}

/// Open inline constructs waiting for their closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum WalkerContext {
	Bold,
	Italic,
	Link(Option<String>),
	Container,
}

/// Walks the tag stream and renders markdown, keeping a stack of open inline
/// constructs. Literal regions (inline code, key combinations, fences and
/// language sub-blocks) are consumed in one step so nothing inside them is
/// substituted.
struct TagWalker<'a> {
	tags: &'a [Tag],
	options: &'a MarkupOptions,
	/// Current index into `tags`.
	cursor: usize,
	/// Open constructs, innermost last.
	stack: Vec<WalkerContext>,
	output: String,
	/// Set after a closing fence so the next content starts on a new line.
	after_fence: bool,
}

impl<'a> TagWalker<'a> {
	fn new(tags: &'a [Tag], options: &'a MarkupOptions) -> Self {
		Self {
			tags,
			options,
			cursor: 0,
			stack: vec![],
			output: String::new(),
			after_fence: false,
		}
	}

	fn render(mut self) -> String {
		let tags = self.tags;
		while let Some(tag) = tags.get(self.cursor) {
			self.cursor += 1;
			self.process(tag);
		}

		self.output
	}

	fn in_container(&self) -> bool {
		self.stack.contains(&WalkerContext::Container)
	}

	fn process(&mut self, tag: &'a Tag) {
		if self.in_container() && tag.is_blank() {
			return;
		}

		let options = self.options;

		match tag {
			Tag::Text(text) => self.push(text),
			Tag::Newline | Tag::LineBreak => self.push_newline(),
			Tag::Bracket | Tag::LeftBracket => self.push("["),
			Tag::RightBracket => self.push("]"),
			Tag::BoldOpen => self.open(tag, WalkerContext::Bold, "**"),
			Tag::ItalicOpen => self.open(tag, WalkerContext::Italic, "*"),
			Tag::BoldClose => self.close(tag, &WalkerContext::Bold, "**"),
			Tag::ItalicClose => self.close(tag, &WalkerContext::Italic, "*"),
			Tag::LinkOpen { target } => self.open(tag, WalkerContext::Link(target.clone()), ""),
			Tag::LinkClose => self.close_link(tag),
			Tag::ContainerOpen => self.open(tag, WalkerContext::Container, ""),
			Tag::ContainerClose => self.close(tag, &WalkerContext::Container, ""),
			Tag::CodeOpen | Tag::KeyOpen => self.inline_code(tag),
			Tag::FenceOpen { language, .. } | Tag::RawFence { language, .. } => {
				let language = language.as_deref().unwrap_or(&options.language);
				self.fence(tag, language);
			}
			Tag::LanguageOpen(language) if self.in_container() => self.language_block(tag, language),
			Tag::Reference { name, .. } | Tag::TypeReference(name) => self.push_code(name),
			Tag::FenceClose
			| Tag::CodeClose
			| Tag::KeyClose
			| Tag::LanguageOpen(_)
			| Tag::LanguageClose(_) => self.push(&tag.to_string()),
		}
	}

	fn push(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}

		if self.after_fence {
			self.after_fence = false;
			if !text.starts_with('\n') {
				self.output.push('\n');
			}
		}

		self.output.push_str(text);
	}

	fn push_newline(&mut self) {
		self.after_fence = false;
		self.output.push('\n');
	}

	fn push_code(&mut self, code: &str) {
		let escaped = code.replace('`', "\\`");
		self.push(&format!("`{escaped}`"));
	}

	/// Index of the tag that balances the opening tag just consumed, counting
	/// nested tags of the same kind. Complete literal regions are skipped, so
	/// a close tag inside inline code or a fence never pairs with an opening
	/// tag outside it.
	fn find_close(&self, open: &Tag, is_close: impl Fn(&Tag) -> bool) -> Option<usize> {
		let mut depth = 0_usize;
		let mut index = self.cursor;

		while let Some(tag) = self.tags.get(index) {
			if is_close(tag) {
				if depth == 0 {
					return Some(index);
				}
				depth -= 1;
			} else if std::mem::discriminant(tag) == std::mem::discriminant(open) {
				depth += 1;
			} else if let Some(end) = self.literal_end(tag, index + 1) {
				index = end;
			}
			index += 1;
		}

		None
	}

	/// Index of the tag closing the literal region opened by `open`, searching
	/// from `start` and ignoring nesting. `None` when `open` does not start a
	/// literal region or the region is never closed.
	fn literal_end(&self, open: &Tag, start: usize) -> Option<usize> {
		let is_close = |tag: &Tag| {
			match (open, tag) {
				(Tag::CodeOpen, Tag::CodeClose)
				| (Tag::KeyOpen, Tag::KeyClose)
				| (Tag::FenceOpen { .. }, Tag::FenceClose)
				| (Tag::RawFence { .. }, Tag::RawFence { .. }) => true,
				(Tag::LanguageOpen(language), Tag::LanguageClose(close)) => language == close,
				_ => false,
			}
		};

		self.tags
			.iter()
			.enumerate()
			.skip(start)
			.find_map(|(index, tag)| is_close(tag).then_some(index))
	}

	/// Emit a tag that could not be paired as its source text.
	fn push_unbalanced(&mut self, tag: &Tag) {
		trace!(%tag, "unbalanced tag kept as literal text");
		self.push(&tag.to_string());
	}

	fn open(&mut self, tag: &Tag, context: WalkerContext, marker: &str) {
		if self.find_close(tag, |t| closes(&context, t)).is_none() {
			self.push_unbalanced(tag);
			return;
		}

		self.push(marker);
		self.stack.push(context);
	}

	fn close(&mut self, tag: &Tag, context: &WalkerContext, marker: &str) {
		let Some(position) = self.stack.iter().rposition(|open| open == context) else {
			self.push_unbalanced(tag);
			return;
		};

		self.stack.remove(position);
		self.push(marker);
	}

	fn close_link(&mut self, tag: &Tag) {
		let Some(position) = self
			.stack
			.iter()
			.rposition(|open| matches!(open, WalkerContext::Link(_)))
		else {
			self.push_unbalanced(tag);
			return;
		};

		if let WalkerContext::Link(Some(target)) = self.stack.remove(position) {
			self.push(&format!(" ({target})"));
		}
	}

	/// Consume tags up to (not including) `end` and return their literal text.
	/// The cursor is left after `end`.
	fn take_literal(&mut self, end: usize) -> String {
		let literal = self.tags[self.cursor..end]
			.iter()
			.map(Tag::literal)
			.collect::<String>();
		self.cursor = end + 1;

		literal
	}

	fn inline_code(&mut self, tag: &Tag) {
		let Some(end) = self.literal_end(tag, self.cursor) else {
			self.push_unbalanced(tag);
			return;
		};

		let code = self.take_literal(end);
		self.push_code(&code);
	}

	fn fence(&mut self, tag: &Tag, language: &str) {
		let Some(end) = self.literal_end(tag, self.cursor) else {
			self.push_unbalanced(tag);
			return;
		};

		let language = language.to_string();
		let code = self.take_literal(end);
		self.push_fence(&language, &code);
	}

	fn language_block(&mut self, tag: &Tag, language: &str) {
		let Some(end) = self.literal_end(tag, self.cursor) else {
			self.push_unbalanced(tag);
			return;
		};

		let code = self.take_literal(end);

		if language == self.options.language {
			self.push_fence(language, &code);
		} else {
			debug!(language, target = %self.options.language, "dropping code sample");
		}
	}

	/// Emit a fenced block with both delimiters on their own lines. One
	/// leading newline and all trailing whitespace are removed from `code`;
	/// everything else, including indentation, is kept. The delimiter is
	/// longer than any backtick run starting a line of `code`.
	fn push_fence(&mut self, language: &str, code: &str) {
		let code = code
			.strip_prefix("\r\n")
			.or_else(|| code.strip_prefix('\n'))
			.unwrap_or(code)
			.trim_end();

		// Indentation in front of the opening tag is dropped rather than left
		// behind as a whitespace-only line.
		let line_start = self.output.rfind('\n').map_or(0, |index| index + 1);
		if self.output[line_start..].trim().is_empty() {
			self.output.truncate(line_start);
		} else {
			self.output.push('\n');
		}
		self.after_fence = false;

		let delimiter = fence_delimiter_for(code);
		self.output.push_str(&delimiter);
		self.output.push_str(language);
		self.output.push('\n');
		if !code.is_empty() {
			self.output.push_str(code);
			self.output.push('\n');
		}
		self.output.push_str(&delimiter);
		self.after_fence = true;
	}
}

fn closes(context: &WalkerContext, tag: &Tag) -> bool {
	matches!(
		(context, tag),
		(WalkerContext::Bold, Tag::BoldClose)
			| (WalkerContext::Italic, Tag::ItalicClose)
			| (WalkerContext::Link(_), Tag::LinkClose)
			| (WalkerContext::Container, Tag::ContainerClose)
	)
}

/// Returns true when a line opens or closes a fenced block.
pub fn is_fence_delimiter(line: &str) -> bool {
	line.trim_start().starts_with(FENCE_DELIMITER)
}

/// Returns true when `line` closes a fence opened with `length` backticks:
/// nothing but a backtick run at least that long.
fn closes_fence(line: &str, length: usize) -> bool {
	let run = leading_backticks(line);
	run >= length && run == line.len()
}

fn leading_backticks(line: &str) -> usize {
	line.bytes().take_while(|byte| *byte == b'`').count()
}

/// Shortest backtick run, at least three long, that no line of `code` can be
/// mistaken for.
fn fence_delimiter_for(code: &str) -> String {
	let longest = code
		.lines()
		.map(|line| leading_backticks(line.trim_start()))
		.max()
		.unwrap_or(0);

	"`".repeat((longest + 1).max(FENCE_DELIMITER.len()))
}

/// Returns true for lines that read like a section heading: a line made up of
/// one bold span, or one that starts with an admonition label such as
/// `**Note:**` or `Warning:`.
pub fn is_section_heading(line: &str) -> bool {
	let line = line.trim();
	let is_bold_only = line.len() > 4
		&& line.starts_with("**")
		&& line.ends_with("**")
		&& !line[2..line.len() - 2].contains("**");
	let label = line.strip_prefix("**").unwrap_or(line);

	is_bold_only || ADMONITION_LABELS.iter().any(|prefix| label.starts_with(prefix))
}

/// Line-oriented cleanup of rendered markdown.
///
/// Lines outside fences are trimmed; lines inside fences are kept exactly as
/// they are. A fence opened with `n` backticks is closed only by a line of at
/// least `n` backticks and nothing else. A blank separator is inserted before a fence opening and before
/// a section heading whenever the previous emitted line has content. Leading
/// and trailing blank lines are dropped.
pub fn normalize_lines(text: &str) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	let mut open_fence: Option<usize> = None;
	let mut prev_was_blank = true;

	for line in text.split('\n') {
		let trimmed = trim_horizontal(line);

		match open_fence {
			None if is_fence_delimiter(line) => {
				if !prev_was_blank {
					lines.push(String::new());
				}
				open_fence = Some(leading_backticks(trimmed));
				prev_was_blank = false;
				lines.push(trimmed.to_string());
				continue;
			}
			Some(length) if closes_fence(trimmed, length) => {
				open_fence = None;
				prev_was_blank = false;
				lines.push(trimmed.to_string());
				continue;
			}
			Some(_) => {
				prev_was_blank = line.trim().is_empty();
				lines.push(line.to_string());
				continue;
			}
			None => {}
		}

		if !prev_was_blank && is_section_heading(trimmed) {
			lines.push(String::new());
		}
		prev_was_blank = trimmed.is_empty();
		lines.push(trimmed.to_string());
	}

	while lines.last().is_some_and(|line| line.trim().is_empty()) {
		lines.pop();
	}
	let leading = lines
		.iter()
		.take_while(|line| line.trim().is_empty())
		.count();
	lines.drain(..leading);

	lines
}

fn trim_horizontal(line: &str) -> &str {
	line.trim_matches([' ', '\t', '\r'])
}
