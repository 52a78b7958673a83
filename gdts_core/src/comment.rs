/// Opening delimiter of a generated doc comment.
pub const COMMENT_OPEN: &str = "/**";
/// Prefix of every content line inside a generated doc comment.
pub const COMMENT_LINE_PREFIX: &str = " * ";
/// Closing delimiter of a generated doc comment.
pub const COMMENT_CLOSE: &str = " */";

const TERMINATOR: &str = "*/";
const ESCAPED_TERMINATOR: &str = "*\\/";

/// Escape every `*/` in `content` so it cannot close the surrounding block
/// comment. Escaped output contains no `*/`, so applying this twice is the
/// same as applying it once.
pub fn escape_comment_terminators(content: &str) -> String {
	content.replace(TERMINATOR, ESCAPED_TERMINATOR)
}

/// Wrap content lines in a `/** ... */` block. Blank lines become a bare ` *`
/// so the block carries no trailing whitespace.
pub fn frame_comment<S: AsRef<str>>(lines: &[S]) -> String {
	let mut output = String::with_capacity(
		lines.iter().map(|line| line.as_ref().len() + 4).sum::<usize>() + 8,
	);

	output.push_str(COMMENT_OPEN);
	output.push('\n');

	for line in lines {
		let line = escape_comment_terminators(line.as_ref());
		if line.is_empty() {
			output.push_str(COMMENT_LINE_PREFIX.trim_end());
		} else {
			output.push_str(COMMENT_LINE_PREFIX);
			output.push_str(&line);
		}
		output.push('\n');
	}

	output.push_str(COMMENT_CLOSE);
	output
}
