/// A signal description with a multi-language code sample.
pub fn codeblocks_lines() -> Vec<&'static str> {
	vec![
		"Emitted when the node is ready.",
		"[codeblocks]",
		"[gdscript]",
		"func _ready():",
		"\tprint(\"ready\")",
		"[/gdscript]",
		"[csharp]",
		"public override void _Ready()",
		"{",
		"\tGD.Print(\"ready\");",
		"}",
		"[/csharp]",
		"[/codeblocks]",
	]
}

/// A method description as it appears in the class reference, still carrying
/// the indentation of the surrounding XML.
pub fn indented_method_lines() -> Vec<&'static str> {
	vec![
		"",
		"\t\tAdds a child [param node]. Nodes can have any number of children.",
		"\t\t[b]Note:[/b] If [param force_readable_name] is [code]true[/code], improves the \
		 readability of the added [param node].",
		"\t\t[codeblock]",
		"\t\tvar child = Node.new()",
		"\t\tadd_child(child)",
		"\t\t[/codeblock]",
		"\t\tSee [url=$DOCS_URL/tutorials/scripting/nodes.html]Nodes[/url] and [Node].",
		"\t",
	]
}

pub fn gdts_toml() -> &'static str {
	r#"
[naming]
public_underscore = ["_get_custom_thing"]
public_underscore_file = "public-underscore.json"

[docs]
language = "csharp"
base_url = "https://example.com/docs"
"#
}
