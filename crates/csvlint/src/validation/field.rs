//! Schema-driven validation of individual fields.

use crate::schema::{ColumnProfile, ColumnType, FormatViolation, ValidationProfile};

use super::message::{codes, ValidationMessage};

/// Position and text of the field being checked.
struct FieldContext<'t> {
    text: &'t str,
    row: usize,
    position: usize,
}

impl FieldContext<'_> {
    fn error(&self, column: &ColumnProfile, code: u32, content: String) -> ValidationMessage {
        ValidationMessage::content(code, self.row, self.position, &column.name, content)
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn is_null_literal(&self) -> bool {
        self.text == "null"
    }
}

type CheckFn = fn(&ColumnProfile, &FieldContext<'_>, &mut Vec<ValidationMessage>);

/// Validates fields against the column profiles of a [`ValidationProfile`].
///
/// The per-type check is chosen once per column at construction. Without a
/// profile every call is a no-op, which is the structural-only path.
pub struct FieldValidator<'p> {
    columns: Vec<(&'p ColumnProfile, CheckFn)>,
}

impl<'p> FieldValidator<'p> {
    /// Bind a validator to a profile, or to nothing.
    pub fn new(profile: Option<&'p ValidationProfile>) -> Self {
        let columns = profile
            .map(|p| {
                p.columns
                    .iter()
                    .map(|column| (column, check_for(column.column_type)))
                    .collect()
            })
            .unwrap_or_default();

        Self { columns }
    }

    /// Returns true if any content validation will run.
    pub fn is_active(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Validate one field.
    ///
    /// `position` is 1-based and indexes the profile's columns directly.
    /// Positions past the last column produce nothing; the row's field-count
    /// check reports those.
    pub fn validate_field(&self, text: &str, row: usize, position: usize) -> Vec<ValidationMessage> {
        let mut messages = Vec::new();

        let Some((column, check)) = position
            .checked_sub(1)
            .and_then(|index| self.columns.get(index))
        else {
            return messages;
        };

        let ctx = FieldContext {
            text,
            row,
            position,
        };
        check(column, &ctx, &mut messages);

        messages
    }
}

fn check_for(column_type: ColumnType) -> CheckFn {
    match column_type {
        ColumnType::String => check_string,
        ColumnType::Integer => check_integer,
        ColumnType::Decimal => check_decimal,
        ColumnType::Boolean => check_boolean,
        ColumnType::Enum => check_enum,
    }
}

/// Required, empty and literal-`null` checks. At most one fires.
fn check_generic(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    if ctx.is_empty() && column.required {
        out.push(ctx.error(
            column,
            codes::REQUIRED,
            format!("Field '{}' is required.", column.name),
        ));
    } else if ctx.is_empty() && !column.can_be_null_or_empty {
        out.push(ctx.error(
            column,
            codes::EMPTY_NOT_ALLOWED,
            format!("Field '{}' must not be null or empty.", column.name),
        ));
    } else if ctx.is_null_literal() && !column.can_be_null_or_empty {
        out.push(ctx.error(
            column,
            codes::NULL_NOT_ALLOWED,
            format!("Field '{}' must not be null.", column.name),
        ));
    }
}

fn check_string(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    let length = ctx.text.chars().count() as i64;

    if length > column.effective_max() {
        out.push(ctx.error(
            column,
            codes::STRING_TOO_LONG,
            format!(
                "Field '{}' must not be more than {} characters.",
                column.name,
                column.effective_max()
            ),
        ));
    }

    if length < column.effective_min() {
        out.push(ctx.error(
            column,
            codes::STRING_TOO_SHORT,
            format!(
                "Field '{}' must not be less than {} characters.",
                column.name,
                column.effective_min()
            ),
        ));
    }

    check_generic(column, ctx, out);

    if let Some(template) = column.format_template() {
        let format = column.format.as_deref().unwrap_or_default();
        let violation = template.check(ctx.text).map(|violation| match violation {
            FormatViolation::InvalidDate => (
                codes::FORMAT_DATE,
                format!(
                    "Field '{}' requires data to be in '{}' date format.",
                    column.name, format
                ),
            ),
            FormatViolation::LengthMismatch => (
                codes::FORMAT_LENGTH,
                format!(
                    "Field '{}' requires data to be in '{}' format.",
                    column.name, format
                ),
            ),
            FormatViolation::DigitMismatch { position } => (
                codes::FORMAT_DIGIT,
                format!(
                    "Field '{}' requires data to be in '{}' format. Character mismatch at position {}. Expected a digit but found a non-digit.",
                    column.name, format, position
                ),
            ),
            FormatViolation::LiteralMismatch { position } => (
                codes::FORMAT_LITERAL,
                format!(
                    "Field '{}' requires data to be in '{}' format. Character mismatch at position {}.",
                    column.name, format, position
                ),
            ),
        });

        if let Some((code, content)) = violation {
            out.push(ctx.error(column, code, content));
        }
    }

    if let Some(regex) = column.compiled_regex() {
        if !regex.is_match(ctx.text) {
            out.push(ctx.error(
                column,
                codes::REGEX_MISMATCH,
                format!(
                    "Field '{}' has data that does not match the required regular expression.",
                    column.name
                ),
            ));
        }
    }
}

fn check_enum(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    let skip_membership = ctx.is_empty() && !column.required;

    if !skip_membership && !column.values.is_empty() && !column.allows_value(ctx.text) {
        out.push(ctx.error(
            column,
            codes::ENUM_VALUE_NOT_ALLOWED,
            format!(
                "Field '{}' must contain one of {} allowed values, but none of the allowed values were found.",
                column.name,
                column.values.len()
            ),
        ));
    }

    check_string(column, ctx, out);
}

fn check_integer(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    if ctx.is_empty() || ctx.is_null_literal() {
        check_generic(column, ctx, out);
        return;
    }

    let Ok(value) = ctx.text.trim().parse::<i64>() else {
        out.push(ctx.error(
            column,
            codes::INTEGER_PARSE,
            format!("Field '{}' must be an integer.", column.name),
        ));
        return;
    };

    if value > column.effective_max() {
        out.push(ctx.error(
            column,
            codes::INTEGER_TOO_LARGE,
            format!(
                "Field '{}' must not be greater than {}.",
                column.name,
                column.effective_max()
            ),
        ));
    }

    if value < column.effective_min() {
        out.push(ctx.error(
            column,
            codes::INTEGER_TOO_SMALL,
            format!(
                "Field '{}' must not be less than {}.",
                column.name,
                column.effective_min()
            ),
        ));
    }

    check_generic(column, ctx, out);
}

fn check_decimal(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    if ctx.is_empty() || ctx.is_null_literal() {
        check_generic(column, ctx, out);
        return;
    }

    let parsed = ctx
        .text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite());
    let Some(value) = parsed else {
        out.push(ctx.error(
            column,
            codes::DECIMAL_PARSE,
            format!("Field '{}' must be a decimal.", column.name),
        ));
        return;
    };

    if value > column.effective_max() as f64 {
        out.push(ctx.error(
            column,
            codes::DECIMAL_TOO_LARGE,
            format!(
                "Field '{}' must not be greater than {}.",
                column.name,
                column.effective_max()
            ),
        ));
    }

    if value < column.effective_min() as f64 {
        out.push(ctx.error(
            column,
            codes::DECIMAL_TOO_SMALL,
            format!(
                "Field '{}' must not be less than {}.",
                column.name,
                column.effective_min()
            ),
        ));
    }

    check_generic(column, ctx, out);
}

fn check_boolean(column: &ColumnProfile, ctx: &FieldContext<'_>, out: &mut Vec<ValidationMessage>) {
    if ctx.is_empty() || ctx.is_null_literal() {
        check_generic(column, ctx, out);
        return;
    }

    let trimmed = ctx.text.trim();
    if !(trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false")) {
        out.push(ctx.error(
            column,
            codes::BOOLEAN_PARSE,
            format!("Field '{}' must be either true or false.", column.name),
        ));
    }
}
