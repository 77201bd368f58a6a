use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

use super::row_mapper::map_row;
use super::{ImportError, ParsedRow};

const UTF8_BOM: char = '\u{feff}';

/// A header-keyed data row together with its line in the source file.
pub(crate) struct CsvRow {
    pub line: u64,
    pub fields: HashMap<String, String>,
}

pub struct ContactCsvParser {
    delimiter: u8,
}

impl ContactCsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse an upload and map every data row, in file order.
    ///
    /// Fails with [`ImportError::Empty`] when the file has no data rows.
    pub fn parse(
        &self,
        content: &[u8],
        owner_id: Option<i64>,
    ) -> Result<Vec<ParsedRow>, ImportError> {
        let rows = self.parse_to_maps(content)?;

        if rows.is_empty() {
            return Err(ImportError::Empty);
        }

        Ok(rows
            .into_iter()
            .map(|row| match map_row(&row.fields, owner_id) {
                Some(candidate) => ParsedRow::Contact {
                    line: row.line,
                    candidate,
                },
                None => ParsedRow::Skipped { line: row.line },
            })
            .collect())
    }

    /// Read rows keyed by trimmed, lower-cased header names.
    pub(crate) fn parse_to_maps(&self, content: &[u8]) -> Result<Vec<CsvRow>, ImportError> {
        let text = String::from_utf8_lossy(content);
        let text = text.trim_start_matches(UTF8_BOM);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::Parse(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    continue;
                }
            };

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let mut fields = HashMap::new();
            for (i, field) in record.iter().enumerate() {
                if let Some(header) = headers.get(i) {
                    fields.insert(header.clone(), field.to_string());
                }
            }

            rows.push(CsvRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                fields,
            });
        }

        Ok(rows)
    }
}

impl Default for ContactCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_trimmed_and_lowercased() {
        let csv = " Name , PHONE ,Email\nSam,5551234567,sam@example.com\n";
        let rows = ContactCsvParser::new().parse_to_maps(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields.get("name").map(String::as_str), Some("Sam"));
        assert_eq!(rows[0].fields.get("phone").map(String::as_str), Some("5551234567"));
        assert_eq!(rows[0].line, 2);
    }

    #[test]
    fn test_bom_and_blank_lines() {
        let csv = "\u{feff}name,phone\n\nAna,+44 20 7946 0000\n,\nBo,07700900123\n";
        let rows = ContactCsvParser::new().parse_to_maps(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields.get("name").map(String::as_str), Some("Ana"));
        assert_eq!(rows[1].fields.get("name").map(String::as_str), Some("Bo"));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let result = ContactCsvParser::new().parse(b"name,phone\n", None);
        assert!(matches!(result, Err(ImportError::Empty)));

        let result = ContactCsvParser::new().parse(b"", None);
        assert!(matches!(result, Err(ImportError::Empty)));
    }

    #[test]
    fn test_parse_keeps_file_order_and_skips() {
        let csv = "name,phone,email\nSam,5551234567,\n,,a@b.com\nLee,(555) 765-4321,lee@example.com\n";
        let rows = ContactCsvParser::new().parse(csv.as_bytes(), Some(7)).unwrap();

        assert_eq!(rows.len(), 3);
        match &rows[0] {
            ParsedRow::Contact { line, candidate } => {
                assert_eq!(*line, 2);
                assert_eq!(candidate.name, "Sam");
                assert_eq!(candidate.user_id, Some(7));
            }
            other => panic!("Expected contact, got {:?}", other),
        }
        assert_eq!(rows[1], ParsedRow::Skipped { line: 3 });
        match &rows[2] {
            ParsedRow::Contact { candidate, .. } => {
                assert_eq!(candidate.phone_number, "+5557654321");
                assert_eq!(candidate.email.as_deref(), Some("lee@example.com"));
            }
            other => panic!("Expected contact, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let csv = "name,phone,group\nSam,5551234567\nLee,5557654321,VIP,extra\n";
        let rows = ContactCsvParser::new().parse(csv.as_bytes(), None).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
