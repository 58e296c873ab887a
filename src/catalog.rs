use thiserror::Error;

use crate::level::{Level, LevelError, LevelId};

/// Non-fatal problems found while parsing a level catalog.
///
/// An offending block is skipped and parsing continues, so one bad
/// entry never takes down the rest of the catalog.
#[derive(Debug, Error)]
pub enum CatalogDiagnostic {
    #[error("line {line}: malformed level header: {text:?}")]
    MalformedHeader { line: usize, text: String },
    #[error("line {line}: terrain row outside any level block")]
    OrphanRow { line: usize },
    #[error("line {line}: {source}")]
    InvalidLevel {
        line: usize,
        #[source]
        source: LevelError,
    },
}

/// Result of a catalog parse: the levels that loaded plus the
/// diagnostics for every block that did not.
#[derive(Debug)]
pub struct ParsedCatalog {
    pub levels: Vec<Level>,
    pub diagnostics: Vec<CatalogDiagnostic>,
}

/// Parses a full level catalog.
///
/// Grammar: a header line `; <difficulty> <number>` introduces a block;
/// the following non-blank lines are terrain rows until the next header
/// or end of input. Blank lines are skipped wherever they occur. Rows
/// keep their leading whitespace since space is the Empty glyph.
#[must_use]
pub fn parse_catalog(source: &str, initial_speed: u32) -> ParsedCatalog {
    let mut levels = Vec::new();
    let mut diagnostics = Vec::new();

    let mut current: Option<(LevelId, usize)> = None;
    let mut rows: Vec<&str> = Vec::new();
    let mut orphan_reported = false;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(';') {
            flush_block(
                current.take(),
                &rows,
                initial_speed,
                &mut levels,
                &mut diagnostics,
            );
            rows.clear();
            orphan_reported = false;

            match parse_header(trimmed) {
                Some(id) => current = Some((id, line)),
                None => {
                    diagnostics.push(CatalogDiagnostic::MalformedHeader {
                        line,
                        text: trimmed.to_string(),
                    });
                    // The rows of a skipped block are not separately
                    // reported as orphans.
                    orphan_reported = true;
                }
            }
        } else if current.is_some() {
            rows.push(raw);
        } else if !orphan_reported {
            diagnostics.push(CatalogDiagnostic::OrphanRow { line });
            orphan_reported = true;
        }
    }

    flush_block(current, &rows, initial_speed, &mut levels, &mut diagnostics);

    ParsedCatalog {
        levels,
        diagnostics,
    }
}

fn flush_block(
    current: Option<(LevelId, usize)>,
    rows: &[&str],
    initial_speed: u32,
    levels: &mut Vec<Level>,
    diagnostics: &mut Vec<CatalogDiagnostic>,
) {
    let Some((id, line)) = current else {
        return;
    };

    match Level::from_rows(rows, id, initial_speed) {
        Ok(level) => levels.push(level),
        Err(source) => diagnostics.push(CatalogDiagnostic::InvalidLevel { line, source }),
    }
}

/// Parses `; <difficulty> <number>` into an identifier. The level
/// number must be a positive integer.
fn parse_header(line: &str) -> Option<LevelId> {
    let rest = line.strip_prefix(';')?;
    let mut tokens = rest.split_whitespace();
    let difficulty = tokens.next()?;
    let number: u32 = tokens.next()?.parse().ok()?;
    if number == 0 {
        return None;
    }
    Some(LevelId::new(difficulty, number))
}
