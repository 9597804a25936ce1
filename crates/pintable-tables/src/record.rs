//! Hand-written comma-separated record splitter.
//!
//! Handles plain fields, double-quoted fields with `""` escapes, and optional
//! stripping of whitespace at the start of each field. Does NOT handle quoted
//! fields spanning multiple lines; pin tables never contain them.

/// Split a single line into its fields.
///
/// An empty line yields no fields at all, so callers can treat it like any
/// other record that fails their filter.
pub fn split_record(line: &str, skip_initial_space: bool) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            ' ' | '\t' if at_field_start && skip_initial_space => {}
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            other => {
                field.push(other);
                at_field_start = false;
            }
        }
    }
    fields.push(field);

    fields
}

/// Iterate over the non-empty records of a table in file order.
pub fn records(text: &str, skip_initial_space: bool) -> impl Iterator<Item = Vec<String>> + '_ {
    text.lines()
        .map(move |line| split_record(line, skip_initial_space))
        .filter(|record| !record.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_fields() {
        assert_eq!(split_record("PA01,1A,3", false), vec!["PA01", "1A", "3"]);
    }

    #[test]
    fn split_keeps_empty_cells() {
        assert_eq!(split_record("PA02,,,4", false), vec!["PA02", "", "", "4"]);
        assert_eq!(split_record("PA03,", false), vec!["PA03", ""]);
    }

    #[test]
    fn split_empty_line() {
        assert!(split_record("", false).is_empty());
    }

    #[test]
    fn split_quoted_field() {
        assert_eq!(
            split_record(r#"PIN_PA01,"LED, red","say ""hi""""#, false),
            vec!["PIN_PA01", "LED, red", r#"say "hi""#]
        );
    }

    #[test]
    fn split_skips_initial_space_only_when_asked() {
        assert_eq!(
            split_record("PIN_PA01,  LED_RED", true),
            vec!["PIN_PA01", "LED_RED"]
        );
        assert_eq!(
            split_record("PIN_PA01,  LED_RED", false),
            vec!["PIN_PA01", "  LED_RED"]
        );
    }

    #[test]
    fn records_skip_blank_lines() {
        let text = "PA01,1\n\nPA02,2\r\n";
        let rows: Vec<_> = records(text, false).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["PA02", "2"]);
    }
}
