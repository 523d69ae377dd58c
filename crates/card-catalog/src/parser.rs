//! Parser for per-set catalog record stores.
//!
//! A catalog is a UTF-8 CSV file with a header row:
//! `name,color_identity[,rarity][,other columns...]`
//!
//! Fields may be double-quoted (card names often contain commas), and a
//! doubled quote inside a quoted field is a literal quote. Quoted fields
//! spanning several lines are not supported.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const NAME_COLUMN: &str = "name";
pub const COLOR_IDENTITY_COLUMN: &str = "color_identity";
pub const RARITY_COLUMN: &str = "rarity";

/// Read a file as UTF-8 lines, dropping a leading byte-order mark
fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Split one CSV record into fields.
///
/// Returns `None` when a quoted field is never closed.
fn split_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

/// Column positions resolved from the header row
struct Header {
    columns: Vec<String>,
    name: usize,
    color_identity: usize,
    rarity: Option<usize>,
}

fn parse_header(file: &str, line: &str) -> Result<Header> {
    let columns: Vec<String> = split_record(line)
        .ok_or_else(|| CatalogError::ParseError {
            file: file.to_string(),
            line: 1,
            reason: "Unterminated quote in header".to_string(),
        })?
        .into_iter()
        .map(|c| c.trim().to_string())
        .collect();

    let find = |column: &str| columns.iter().position(|c| c == column);
    let missing = |column: &str| CatalogError::MissingColumn {
        file: file.to_string(),
        column: column.to_string(),
    };

    Ok(Header {
        name: find(NAME_COLUMN).ok_or_else(|| missing(NAME_COLUMN))?,
        color_identity: find(COLOR_IDENTITY_COLUMN).ok_or_else(|| missing(COLOR_IDENTITY_COLUMN))?,
        rarity: find(RARITY_COLUMN),
        columns,
    })
}

/// Parse a catalog CSV file into cards, in file order.
///
/// Duplicate names are not checked here; `Catalog` rejects them on insert.
pub fn parse_cards(path: &Path) -> Result<Vec<Card>> {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let lines = read_lines(path)?;

    let mut rows = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = rows.next().ok_or_else(|| CatalogError::ParseError {
        file: file.clone(),
        line: 1,
        reason: "Missing header row".to_string(),
    })?;
    let header = parse_header(&file, header_line)?;

    let mut cards = Vec::new();
    for (idx, line) in rows {
        let line_no = idx + 1;
        let fields = split_record(line).ok_or_else(|| CatalogError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: "Unterminated quote".to_string(),
        })?;

        if fields.len() != header.columns.len() {
            return Err(CatalogError::FieldCountMismatch {
                expected: header.columns.len(),
                found: fields.len(),
                line: line_no,
            });
        }

        let name = fields[header.name].trim();
        if name.is_empty() {
            return Err(CatalogError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: "Empty card name".to_string(),
            });
        }

        let color_identity: ColorIdentity = fields[header.color_identity].parse()?;

        let rarity = header
            .rarity
            .map(|i| fields[i].trim().to_string())
            .filter(|r| !r.is_empty());

        let attributes: BTreeMap<String, String> = header
            .columns
            .iter()
            .zip(fields.iter())
            .enumerate()
            .filter(|(i, _)| {
                *i != header.name && *i != header.color_identity && Some(*i) != header.rarity
            })
            .map(|(_, (column, value))| (column.clone(), value.clone()))
            .collect();

        cards.push(Card {
            name: name.to_string(),
            color_identity,
            rarity,
            attributes,
        });
    }

    Ok(cards)
}
