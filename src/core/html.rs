use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Selector};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ProcessingError {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Selector for a table cell by the site's `data-stat` attribute.
pub fn stat_cell(tag: &str, data_stat: &str) -> Result<Selector> {
    selector(&format!("{}[data-stat=\"{}\"]", tag, data_stat))
}

/// All descendant text, whitespace-trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, `None` when absent or blank.
pub fn first_text(parent: ElementRef<'_>, selector: &Selector) -> Option<String> {
    parent
        .select(selector)
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty())
}

/// Drops the award/eligibility markers (`*` Pro Bowl, `+` All-Pro) the site appends to names.
pub fn clean_name(raw: &str) -> String {
    raw.replace(['*', '+'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("John Doe*+"), "John Doe");
        assert_eq!(clean_name(" Patrick Mahomes* "), "Patrick Mahomes");
        assert_eq!(clean_name("Ja'Marr Chase"), "Ja'Marr Chase");
    }

    #[test]
    fn test_first_text_skips_blank_cells() {
        let fragment = Html::parse_fragment(
            r#"<table><tr><td data-stat="team">  </td><td data-stat="age">27</td></tr></table>"#,
        );
        let row_selector = selector("tr").unwrap();
        let row = fragment.select(&row_selector).next().unwrap();

        assert_eq!(first_text(row, &stat_cell("td", "team").unwrap()), None);
        assert_eq!(
            first_text(row, &stat_cell("td", "age").unwrap()),
            Some("27".to_string())
        );
        assert_eq!(first_text(row, &stat_cell("td", "gs").unwrap()), None);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(selector("td[data-stat=").is_err());
    }
}
