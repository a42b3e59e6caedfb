/*!
 * `%%key%%` template expansion.
 *
 * Formats such as `title_format` and `ep_title_format` are plain strings with
 * placeholders naming metadata keys. Expansion is a single, non-recursive pass:
 * substituted values are never scanned for further placeholders.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TemplateError;
use crate::metadata::{Metadata, render_value};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%%(.*?)%%").expect("placeholder pattern is valid"));

/// Expand every `%%key%%` in `template` using `lookup`.
///
/// `template_name` only labels errors.
pub fn expand(template: &str, template_name: &str, lookup: &Metadata) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 always exists");
        let key = &caps[1];

        let value = lookup.get(key).ok_or_else(|| TemplateError::MissingValue {
            key: key.to_string(),
            template: template_name.to_string(),
        })?;
        let rendered = render_value(value).ok_or_else(|| TemplateError::NotScalar {
            key: key.to_string(),
            template: template_name.to_string(),
        })?;

        output.push_str(&template[last..whole.start()]);
        output.push_str(&rendered);
        last = whole.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

/// Resolve the format stored under `format_key` against the metadata itself.
pub fn resolve_format(metadata: &Metadata, format_key: &str) -> Result<String, TemplateError> {
    let template = metadata
        .get_string(format_key)
        .ok_or_else(|| TemplateError::MissingFormat {
            template: format_key.to_string(),
        })?;

    expand(&template, format_key, metadata)
}
