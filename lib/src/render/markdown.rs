use pulldown_cmark::{html, Options, Parser};

/// Renders Markdown `input` as HTML. Empty or whitespace-only input renders
/// as an empty string.
pub fn markdown_to_html(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let options = Options::all().difference(Options::ENABLE_SMART_PUNCTUATION);
    let parser = Parser::new_ext(input, options);

    let mut output = String::with_capacity(input.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output.truncate(output.trim_end().len());
    output
}
