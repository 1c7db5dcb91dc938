//! Pulls dropdown options and cause-list links out of portal HTML.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::formats::SelectOption;

/// Substring identifying the cause-list PDF anchor on the query page.
pub const DEFAULT_PDF_MARKER: &str = "cause_list_pdf";

static OPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("option selector is valid"));
static SELECT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select").expect("select selector is valid"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("response is not an option list: no <select> or <option> markup")]
    NoSelectMarkup,
}

/// Extract `(value, label)` pairs from every `<option>` element, in document order.
///
/// Options whose label is blank are skipped (the portal uses them as
/// "Select ..." placeholders). An empty body, an empty `<select>` or a list of
/// blank options is a legitimately empty list. A non-empty page with neither
/// `<select>` nor `<option>` markup is reported as
/// [`ExtractError::NoSelectMarkup`].
pub fn extract_options(html: &str) -> Result<Vec<SelectOption>, ExtractError> {
    let document = Html::parse_document(html);

    let mut seen_elements = 0_usize;
    let mut options = Vec::new();
    for element in document.select(&OPTION_SELECTOR) {
        seen_elements += 1;
        let name = element_text(&element);
        if name.is_empty() {
            continue;
        }
        let code = match element.value().attr("value") {
            Some(value) => value.to_owned(),
            None => name.clone(),
        };
        options.push(SelectOption { code, name });
    }

    if seen_elements == 0
        && !html.trim().is_empty()
        && document.select(&SELECT_SELECTOR).next().is_none()
    {
        return Err(ExtractError::NoSelectMarkup);
    }

    tracing::debug!(
        elements = seen_elements,
        options = options.len(),
        "extracted options"
    );
    Ok(options)
}

/// Return the `href` of the first anchor whose link contains `marker`.
pub fn find_pdf_link(html: &str, marker: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find(|href| href.contains(marker))
        .map(|href| href.trim().to_owned())
}

fn element_text(element: &ElementRef<'_>) -> String {
    let text = element.text().collect::<String>();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
