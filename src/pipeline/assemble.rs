//! Assembly: per-page markdown blocks → one text artifact.
//!
//! Pages are numbered by their 1-indexed position in the response, and a
//! page with no text block is *omitted without renumbering* the rest —
//! `[A, ∅, C]` yields "Page 1" and "Page 3". Renumbering would misrepresent
//! where text sits in the source document.
//!
//! A response with no pages, or whose pages all lack text, assembles to
//! [`TextArtifact::Empty`] — a successful outcome. No error variant exists
//! for it.

use crate::output::TextArtifact;
use crate::remote::OcrPage;

/// Header prefix for each page block.
const PAGE_HEADER: &str = "### Page";

/// Concatenate the markdown-bearing pages into a single artifact.
///
/// A page "carries text" when its markdown block is present — an empty
/// string still counts (the page produced a block, it just happens to be
/// blank). Only pages with no block at all are skipped.
pub fn assemble_pages(pages: &[OcrPage]) -> TextArtifact {
    let blocks: Vec<String> = pages
        .iter()
        .enumerate()
        .filter_map(|(i, page)| {
            page.markdown
                .as_ref()
                .map(|md| format!("{PAGE_HEADER} {}\n{}", i + 1, md))
        })
        .collect();

    if blocks.is_empty() {
        TextArtifact::Empty
    } else {
        TextArtifact::Text(blocks.join("\n\n"))
    }
}

/// Count of pages carrying a markdown block (for stats).
pub fn pages_with_text(pages: &[OcrPage]) -> usize {
    pages.iter().filter(|p| p.markdown.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize, markdown: Option<&str>) -> OcrPage {
        OcrPage {
            index,
            markdown: markdown.map(String::from),
        }
    }

    #[test]
    fn skipped_pages_keep_their_original_index() {
        let pages = vec![page(0, Some("A")), page(1, None), page(2, Some("C"))];
        let artifact = assemble_pages(&pages);
        assert_eq!(
            artifact.display_text(),
            "### Page 1\nA\n\n### Page 3\nC"
        );
    }

    #[test]
    fn single_page_document() {
        let pages = vec![page(0, Some("only page"))];
        assert_eq!(assemble_pages(&pages).display_text(), "### Page 1\nonly page");
    }

    #[test]
    fn no_pages_yields_the_empty_artifact() {
        let artifact = assemble_pages(&[]);
        assert!(artifact.is_empty());
        assert_eq!(artifact.display_text(), "❌ No text extracted.");
    }

    #[test]
    fn all_textless_pages_yield_the_empty_artifact() {
        let pages = vec![page(0, None), page(1, None)];
        assert!(assemble_pages(&pages).is_empty());
    }

    #[test]
    fn empty_markdown_still_counts_as_a_text_block() {
        let pages = vec![page(0, Some("")), page(1, Some("B"))];
        assert_eq!(assemble_pages(&pages).display_text(), "### Page 1\n\n\n### Page 2\nB");
    }

    #[test]
    fn pages_with_text_counts_present_blocks_only() {
        let pages = vec![page(0, Some("A")), page(1, None), page(2, Some(""))];
        assert_eq!(pages_with_text(&pages), 2);
    }

    #[test]
    fn multi_line_markdown_is_preserved_verbatim() {
        let pages = vec![page(0, Some("# Title\n\nBody text."))];
        assert_eq!(
            assemble_pages(&pages).display_text(),
            "### Page 1\n# Title\n\nBody text."
        );
    }
}
