//! RFC 4180 quote scanner for one logical row.

/// Kind of misplaced quote found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuoteErrorKind {
    /// A lone quote inside a quoted field, not doubled and not closing it.
    UnescapedInQuotedField,
    /// A quote in the middle of an unquoted field.
    OutsideQuotedField,
}

impl QuoteErrorKind {
    pub(crate) fn description(self) -> &'static str {
        match self {
            Self::UnescapedInQuotedField => "Unescaped quote detected in a quoted field",
            Self::OutsideQuotedField => "Quote detected outside of a quoted string",
        }
    }
}

/// A misplaced quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuoteError {
    pub kind: QuoteErrorKind,
    /// 1-based field the quote belongs to.
    pub field_number: usize,
    /// 0-based character offset within the row.
    pub character: usize,
}

/// Outcome of scanning one logical row.
#[derive(Debug)]
pub(crate) struct RowScan<'a> {
    /// Raw field slices, quotes retained.
    pub fields: Vec<&'a str>,
    pub quote_errors: Vec<QuoteError>,
    /// Opening quote of a field that runs past the end of the row, as
    /// `(field_number, character)`. Only set when the last character left
    /// the field open without tripping a quote error.
    pub open_quote: Option<(usize, usize)>,
}

impl RowScan<'_> {
    /// The row ended inside a quoted field and needs the next physical line.
    pub fn needs_continuation(&self) -> bool {
        self.open_quote.is_some()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Scan a logical row, splitting it into fields and recording quote errors.
///
/// Separators only split outside quoted fields. A zero-length row yields a
/// single empty field.
///
/// The row continues onto the next line when its last character is plain
/// text inside a quoted field, or is the quote that opens one. A row whose
/// last character trips a quote error ends there, even though its quoted
/// field never closed.
pub(crate) fn scan_row(row: &str, separator: char, quote: char) -> RowScan<'_> {
    let chars: Vec<(usize, char)> = row.char_indices().collect();

    let mut fields = Vec::new();
    let mut quote_errors = Vec::new();
    let mut in_quoted_field = false;
    let mut escape_pending = false;
    let mut quote_start = (0, 0);
    let mut field_start = 0;
    let mut runs_on = false;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|&(_, n)| n);
        let at_field_start = prev.is_none_or(|p| p == separator);
        let at_field_end = next.is_none_or(|n| n == separator);
        let field_number = fields.len() + 1;

        if c == quote {
            if !in_quoted_field && at_field_start {
                in_quoted_field = true;
                quote_start = (field_number, i);
                runs_on = next.is_none();
            } else if in_quoted_field && at_field_end {
                in_quoted_field = false;
                escape_pending = false;
            } else if in_quoted_field && !escape_pending {
                escape_pending = true;
            } else if in_quoted_field && prev == Some(quote) {
                escape_pending = false;
            } else if !in_quoted_field {
                quote_errors.push(QuoteError {
                    kind: QuoteErrorKind::OutsideQuotedField,
                    field_number,
                    character: i,
                });
            }
        } else if in_quoted_field && escape_pending {
            quote_errors.push(QuoteError {
                kind: QuoteErrorKind::UnescapedInQuotedField,
                field_number,
                character: i,
            });
            escape_pending = false;
        } else if in_quoted_field && next.is_none() {
            runs_on = true;
        }

        if c == separator && !in_quoted_field {
            fields.push(&row[field_start..offset]);
            field_start = offset + c.len_utf8();
        }
    }

    fields.push(&row[field_start..]);

    RowScan {
        fields,
        quote_errors,
        open_quote: runs_on.then_some(quote_start),
    }
}
