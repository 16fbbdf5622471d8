//! Shared reader configuration for delimited sources

use csv::{Reader, ReaderBuilder, Trim};

/// Build a reader over in-memory content.
///
/// Every field is trimmed, rows may differ in length, and a leading UTF-8
/// byte order mark is dropped so it cannot leak into the first header.
pub(crate) fn reader(content: &str, delimiter: u8, has_headers: bool) -> Reader<&[u8]> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_fields_and_allows_ragged_rows() {
        let mut rdr = reader(" 1 , 0\n0\n", b',', false);
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(rows, vec![vec!["1", "0"], vec!["0"]]);
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut rdr = reader("\u{feff}nodeId,start\n1,2020-01-01\n", b',', true);
        assert_eq!(rdr.headers().unwrap().get(0), Some("nodeId"));
    }

    #[test]
    fn honours_custom_delimiter() {
        let mut rdr = reader("1;0;1\n", b';', false);
        assert_eq!(rdr.records().next().unwrap().unwrap().len(), 3);
    }
}
