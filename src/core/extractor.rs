use crate::domain::model::{ExtractedFields, Field, RawCell};
use crate::utils::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use std::collections::BTreeMap;

pub const DEFAULT_CELL_CLASS_TEMPLATE: &str = "{} ng-binding ng-scope";

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Pulls the stats columns out of a rendered page.
///
/// Cells are matched by their full `class` attribute, built from a template
/// such as `"{} ng-binding ng-scope"` with the field token in the slot.
pub struct FieldExtractor {
    selectors: Vec<(Field, Selector)>,
    anchor: Selector,
}

impl FieldExtractor {
    pub fn new(class_template: &str) -> Result<Self> {
        let selectors = Field::ALL
            .iter()
            .map(|&field| {
                let class = class_template.replace("{}", field.class_token());
                parse_selector(&format!("td[class=\"{}\"]", class)).map(|sel| (field, sel))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            selectors,
            anchor: parse_selector("a[href]")?,
        })
    }

    /// Never fails on unexpected markup: a page without the table yields
    /// empty columns.
    pub fn extract(&self, markup: &str) -> ExtractedFields {
        let document = Html::parse_document(markup);

        let mut columns = BTreeMap::new();
        for (field, selector) in &self.selectors {
            let cells: Vec<RawCell> = document
                .select(selector)
                .map(|el| RawCell::new(el.inner_html()))
                .collect();
            tracing::debug!("Matched {} '{}' cells", cells.len(), field.class_token());
            columns.insert(*field, cells);
        }

        let links = columns
            .get(&Field::Name)
            .map(|cells| self.extract_links(cells))
            .unwrap_or_default();

        ExtractedFields { columns, links }
    }

    /// `href` of the first anchor in each name cell. Cells without one
    /// contribute nothing, which the record builder reports as misalignment.
    pub fn extract_links(&self, name_cells: &[RawCell]) -> Vec<String> {
        name_cells
            .iter()
            .filter_map(|cell| {
                let fragment = Html::parse_fragment(&cell.html);
                let href = fragment
                    .select(&self.anchor)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string);
                if href.is_none() {
                    tracing::warn!("Name cell without a link: {}", cell.html);
                }
                href
            })
            .collect()
    }
}
