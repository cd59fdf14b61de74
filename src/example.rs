//! Example configuration rendering.
//!
//! Turns a schema into annotated `KEY=value` text suitable for a sample
//! `.env` file. Pure formatting: nothing here validates, and the output
//! follows declaration order.

use crate::schema::Schema;
use crate::validator::Validator;

/// Placeholder rendered instead of a secret field's value.
const SECRET_PLACEHOLDER: &str = "<secret>";

/// Renders annotated example text for every declared field.
///
/// Each entry carries its description, documentation link, allowed
/// choices, and deprecation notice as `#` comments, then a `KEY=value`
/// line. The value is the declared example if one exists, otherwise the
/// static default, otherwise empty. Secret fields always render the
/// placeholder, never a real value.
#[must_use]
pub fn render_example(schema: &Schema) -> String {
    let mut out = String::new();

    for (index, (field, validator)) in schema.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let opts = validator.options();

        if let Some(desc) = &opts.desc {
            out.push_str(&format!("# {desc}\n"));
        }
        if let Some(docs) = &opts.docs {
            out.push_str(&format!("# Docs: {docs}\n"));
        }
        if let Some(choices) = &opts.choices {
            let listed = choices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("# One of: {listed}\n"));
        }
        if let Some(notice) = &opts.deprecated {
            out.push_str(&format!("# Deprecated: {notice}\n"));
        }

        let value = if opts.secret {
            SECRET_PLACEHOLDER.to_string()
        } else if let Some(example) = &opts.example {
            example.clone()
        } else if let Some(default) = &opts.default {
            default.to_string()
        } else {
            String::new()
        };
        out.push_str(&format!("{field}={value}\n"));
    }

    out
}

// ============================================================================
// Tests
// ============================================================================
