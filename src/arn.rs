use {crate::StanzaError, log::debug, std::collections::BTreeMap};

/// The value substituted for the generic `${Region}` and `${Account}`
/// placeholders when the caller supplies none. Which of the two applies is a
/// property of the resource type: most ARN shapes scope these segments with
/// `*`, but some services document them as empty segments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SegmentDefault {
    Wildcard,
    Empty,
}

impl SegmentDefault {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wildcard => "*",
            Self::Empty => "",
        }
    }
}

impl Default for SegmentDefault {
    fn default() -> Self {
        Self::Wildcard
    }
}

/// Substitute every `${Name}` placeholder in `template`.
///
/// Resolution precedence per placeholder: an explicit entry in `values`, then
/// the generic defaults (`aws` for `${Partition}`, `segment_default` for
/// `${Region}` and `${Account}`). Any other placeholder without an explicit
/// value is a resource identifier and has no default; it fails with
/// [StanzaError::UnresolvedPlaceholder]. The output never contains `${`.
pub(crate) fn resolve(
    template: &str,
    values: &BTreeMap<&str, &str>,
    segment_default: SegmentDefault,
) -> Result<String, StanzaError> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = match after.find('}') {
            Some(end) => end,
            None => {
                debug!("ARN template '{template}' has an unterminated placeholder.");
                return Err(StanzaError::InvalidArnTemplate(template.to_string()));
            }
        };

        let name = &after[..end];
        if name.is_empty() {
            debug!("ARN template '{template}' has an empty placeholder.");
            return Err(StanzaError::InvalidArnTemplate(template.to_string()));
        }

        match values.get(name) {
            Some(value) => resolved.push_str(value),
            None => match name {
                "Partition" => resolved.push_str("aws"),
                "Region" | "Account" => resolved.push_str(segment_default.as_str()),
                _ => {
                    debug!("ARN template '{template}' placeholder '{name}' has no value and no default.");
                    return Err(StanzaError::UnresolvedPlaceholder(name.to_string()));
                }
            },
        }

        rest = &after[end + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}
