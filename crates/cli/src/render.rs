//! Terminal rendering of the engine header and search results.
//!
//! Layout follows the web client this replaces: a supertitle with the
//! published date, authors and category ids, then title, summary and
//! the id as a link, with a marker for judged documents.

use paperino_core::{Document, Verdict};

/// Header line with the engine option label.
pub fn header(option_label: &str) -> String {
    format!("arXiv search engine [ option:{} ]", option_label)
}

fn judge_marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Unset => "   ",
        Verdict::Relevant => "[+]",
        Verdict::NotRelevant => "[-]",
    }
}

/// Render a single document.
pub fn document(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} | {}  [{}]\n",
        judge_marker(doc.judge),
        doc.published,
        doc.authors.join(", "),
        doc.category_ids.join(" "),
    ));
    out.push_str(&format!("    {}\n", doc.title));
    out.push_str(&format!("    {}\n", doc.summary));
    out.push_str(&format!("    {}\n", doc.id));
    out
}

/// Render the whole collection.
pub fn documents(docs: &[Document]) -> String {
    if docs.is_empty() {
        return "no documents\n".to_string();
    }

    docs.iter().map(document).collect::<Vec<_>>().join("\n")
}
