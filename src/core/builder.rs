use crate::domain::model::{ExtractedFields, Field, RawFieldBundle};
use crate::utils::error::{Result, ScrapeError};
use std::collections::BTreeMap;

/// Zips the extracted columns into one bundle per player row.
///
/// Every column and the link list must be as long as the name column; the
/// check runs before any bundle is assembled.
pub fn build_bundles(fields: ExtractedFields) -> Result<Vec<RawFieldBundle>> {
    let expected = fields.column_len(Field::Name);

    for field in Field::ALL {
        let actual = fields.column_len(field);
        if actual != expected {
            return Err(ScrapeError::AlignmentError {
                field: field.class_token().to_string(),
                expected,
                actual,
            });
        }
    }
    if fields.links.len() != expected {
        return Err(ScrapeError::AlignmentError {
            field: "player_link".to_string(),
            expected,
            actual: fields.links.len(),
        });
    }

    let ExtractedFields { columns, links } = fields;
    let mut columns: Vec<_> = columns
        .into_iter()
        .map(|(field, cells)| (field, cells.into_iter()))
        .collect();

    let bundles = links
        .into_iter()
        .enumerate()
        .map(|(row, link)| {
            let cells: BTreeMap<_, _> = columns
                .iter_mut()
                .filter_map(|(field, cells)| cells.next().map(|cell| (*field, cell)))
                .collect();
            RawFieldBundle { row, cells, link }
        })
        .collect();

    Ok(bundles)
}
