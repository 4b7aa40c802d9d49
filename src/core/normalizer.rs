use crate::core::extractor::parse_selector;
use crate::core::photo::PhotoResolver;
use crate::domain::model::{Field, PlayerFields, PlayerRecord, RawCell, RawFieldBundle};
use crate::domain::ports::PhotoFetcher;
use crate::utils::error::{Result, ScrapeError};
use scraper::{Html, Selector};
use std::collections::BTreeMap;

pub const NOT_AVAILABLE: &str = "N/A";

/// Footer token some pages append to the name cell's text.
pub const DEFAULT_NAME_ARTIFACT: &str = "(total)a a+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Text of the cell's first `<a>`.
    Anchor,
    /// Text of the cell's first `<span>`.
    Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Empty text is a valid value and is kept.
    Keep,
    /// Empty text is replaced by the given value.
    Substitute(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub source: TextSource,
    pub default: DefaultPolicy,
    pub strip_artifacts: bool,
}

pub const FIELD_RULES: [FieldRule; 7] = [
    FieldRule {
        field: Field::Name,
        source: TextSource::Anchor,
        default: DefaultPolicy::Keep,
        strip_artifacts: true,
    },
    FieldRule {
        field: Field::Position,
        source: TextSource::Span,
        default: DefaultPolicy::Substitute(NOT_AVAILABLE),
        strip_artifacts: false,
    },
    FieldRule {
        field: Field::JerseyNumber,
        source: TextSource::Span,
        default: DefaultPolicy::Substitute(NOT_AVAILABLE),
        strip_artifacts: false,
    },
    FieldRule {
        field: Field::Rank,
        source: TextSource::Span,
        default: DefaultPolicy::Substitute(NOT_AVAILABLE),
        strip_artifacts: false,
    },
    FieldRule {
        field: Field::GamesPlayed,
        source: TextSource::Span,
        default: DefaultPolicy::Keep,
        strip_artifacts: false,
    },
    FieldRule {
        field: Field::Goals,
        source: TextSource::Span,
        default: DefaultPolicy::Keep,
        strip_artifacts: false,
    },
    FieldRule {
        field: Field::PenaltyMinutes,
        source: TextSource::Span,
        default: DefaultPolicy::Keep,
        strip_artifacts: false,
    },
];

pub struct Normalizer {
    anchor: Selector,
    span: Selector,
    artifacts: Vec<String>,
}

impl Normalizer {
    pub fn new(artifacts: &[String]) -> Result<Self> {
        Ok(Self {
            anchor: parse_selector("a")?,
            span: parse_selector("span")?,
            artifacts: artifacts.iter().filter(|a| !a.is_empty()).cloned().collect(),
        })
    }

    /// Removes every artifact token by exact substring match. Surrounding
    /// whitespace is left alone.
    pub fn clean_name(&self, raw: &str) -> String {
        self.artifacts
            .iter()
            .fold(raw.to_string(), |name, artifact| name.replace(artifact.as_str(), ""))
    }

    /// Text of the rule's source element, or of the whole cell when the
    /// element is absent. No trimming.
    fn cell_text(&self, cell: &RawCell, source: TextSource) -> String {
        let fragment = Html::parse_fragment(&cell.html);
        let selector = match source {
            TextSource::Anchor => &self.anchor,
            TextSource::Span => &self.span,
        };
        match fragment.select(selector).next() {
            Some(element) => element.text().collect(),
            None => fragment.root_element().text().collect(),
        }
    }

    fn apply(&self, rule: &FieldRule, bundle: &RawFieldBundle) -> String {
        let mut text = bundle
            .cell(rule.field)
            .map(|cell| self.cell_text(cell, rule.source))
            .unwrap_or_default();

        if rule.strip_artifacts {
            text = self.clean_name(&text);
        }

        match rule.default {
            DefaultPolicy::Substitute(value) if text.is_empty() => value.to_string(),
            _ => text,
        }
    }

    /// Applies the rule table to one bundle. Pure: no I/O.
    pub fn normalize_fields(&self, bundle: &RawFieldBundle) -> Result<PlayerFields> {
        let mut values: BTreeMap<Field, String> = FIELD_RULES
            .iter()
            .map(|rule| (rule.field, self.apply(rule, bundle)))
            .collect();
        let mut take = |field: Field| values.remove(&field).unwrap_or_default();

        let name = take(Field::Name);
        if name.trim().is_empty() {
            return Err(ScrapeError::EmptyNameError { row: bundle.row });
        }

        Ok(PlayerFields {
            name,
            position: take(Field::Position),
            number: take(Field::JerseyNumber),
            rank: take(Field::Rank),
            games_played: take(Field::GamesPlayed),
            goals: take(Field::Goals),
            penalty_minutes: take(Field::PenaltyMinutes),
        })
    }

    /// Normalizes the text fields, then resolves the player's photo.
    pub async fn normalize<F: PhotoFetcher>(
        &self,
        bundle: &RawFieldBundle,
        photos: &PhotoResolver<F>,
    ) -> Result<PlayerRecord> {
        let fields = self.normalize_fields(bundle)?;
        let photo = photos.resolve(&bundle.link).await?;
        Ok(fields.with_photo(photo.into_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(name: &str, position: &str, goals: &str) -> RawFieldBundle {
        let mut cells = BTreeMap::new();
        cells.insert(
            Field::Name,
            RawCell::new(format!(r#"<a href="/p/1234/x-y">{}</a>"#, name)),
        );
        cells.insert(Field::Position, RawCell::new(format!("<span>{}</span>", position)));
        cells.insert(Field::JerseyNumber, RawCell::new("<span></span>"));
        cells.insert(Field::Rank, RawCell::new("<span>3</span>"));
        cells.insert(Field::GamesPlayed, RawCell::new("<span></span>"));
        cells.insert(Field::Goals, RawCell::new(format!("<span>{}</span>", goals)));
        cells.insert(Field::PenaltyMinutes, RawCell::new("<span>1,024</span>"));
        RawFieldBundle {
            row: 0,
            cells,
            link: "/p/1234/x-y".to_string(),
        }
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(&[DEFAULT_NAME_ARTIFACT.to_string()]).unwrap()
    }

    #[test]
    fn test_rule_table_covers_every_field_once() {
        for field in Field::ALL {
            assert_eq!(
                FIELD_RULES.iter().filter(|r| r.field == field).count(),
                1,
                "{:?}",
                field
            );
        }
    }

    #[test]
    fn test_empty_position_number_rank_become_na() {
        let fields = normalizer().normalize_fields(&bundle("Jane Doe", "", "4")).unwrap();
        assert_eq!(fields.position, "N/A");
        assert_eq!(fields.number, "N/A");
        assert_eq!(fields.rank, "3");
    }

    #[test]
    fn test_non_empty_values_pass_through() {
        let fields = normalizer().normalize_fields(&bundle("Jane Doe", "D", "4")).unwrap();
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.position, "D");
        assert_eq!(fields.goals, "4");
        assert_eq!(fields.penalty_minutes, "1,024");
    }

    #[test]
    fn test_stat_fields_keep_empty_text() {
        let fields = normalizer().normalize_fields(&bundle("Jane Doe", "D", "")).unwrap();
        assert_eq!(fields.goals, "");
        assert_eq!(fields.games_played, "");
    }

    #[test]
    fn test_name_artifact_removed() {
        let fields = normalizer()
            .normalize_fields(&bundle("Jane Doe(total)a a+", "D", "1"))
            .unwrap();
        assert_eq!(fields.name, "Jane Doe");
    }

    #[test]
    fn test_clean_name_is_idempotent() {
        let normalizer = normalizer();
        let once = normalizer.clean_name("Jane Doe(total)a a+");
        assert_eq!(normalizer.clean_name(&once), once);
        assert_eq!(normalizer.clean_name("  John Roe "), "  John Roe ");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let result = normalizer().normalize_fields(&bundle("(total)a a+", "D", "1"));
        assert!(matches!(result, Err(ScrapeError::EmptyNameError { row: 0 })));
    }

    #[test]
    fn test_cell_without_span_uses_cell_text() {
        let mut b = bundle("Jane Doe", "D", "1");
        b.cells.insert(Field::Goals, RawCell::new("17"));
        let fields = normalizer().normalize_fields(&b).unwrap();
        assert_eq!(fields.goals, "17");
    }
}
