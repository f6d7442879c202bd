use scraper::node::Node;
use scraper::Html;

/// Elements whose text content is never spoken.
const SILENT_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Parse `markup` as an HTML fragment and concatenate its text nodes.
///
/// Entities are decoded by the parser. Newlines in text nodes are kept as-is,
/// while comments, attributes and the content of [`SILENT_ELEMENTS`] are dropped.
pub fn extract_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut text = String::with_capacity(markup.len());

    for node in fragment.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let silenced = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SILENT_ELEMENTS.contains(&element.name()))
        });

        if !silenced {
            text.push_str(&chunk.text);
        }
    }

    text
}
