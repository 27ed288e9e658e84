use crate::Error;

/// Maximum length of a DNS name.
const MAX_SERVER_NAME_LEN: usize = 253;
/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// Type contract for the raw string value of an annotation.
///
/// Every variant is a pure, total check over strings: it holds no state and
/// never looks at anything besides the value it is given. The validator is
/// stored in the catalog next to the annotation it describes, so typed
/// extraction and documentation always agree on the accepted shape.
///
/// `ssl-passthrough` only needs [`Bool`](Self::Bool); the remaining variants
/// cover the value shapes of other annotation modules built on the same
/// catalog (numeric limits, fixed protocol names, host names, free text).
///
/// # Examples
///
/// ```
/// use annotation_policy::ValueValidator;
///
/// assert!(ValueValidator::Bool.validate("ssl-passthrough", "TRUE").is_ok());
/// assert!(ValueValidator::Bool.validate("ssl-passthrough", "yes").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueValidator {
    /// `true` or `false`, ASCII case-insensitive.
    Bool,
    /// A signed 64-bit decimal integer.
    Int,
    /// One of a fixed set of literals, compared case-sensitively.
    Options(&'static [&'static str]),
    /// A DNS host name, optionally with a leading `*.` wildcard.
    ServerName,
    /// Accepts any value.
    Null,
}

impl ValueValidator {
    /// Checks `value` against this contract.
    ///
    /// `key` is only used to label the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the value does not satisfy the
    /// contract.
    pub fn validate(&self, key: &str, value: &str) -> Result<(), Error> {
        match self {
            ValueValidator::Bool => parse_bool(key, value).map(|_| ()),
            ValueValidator::Int => parse_int(key, value).map(|_| ()),
            ValueValidator::Options(options) => validate_options(key, value, options),
            ValueValidator::ServerName => validate_server_name(key, value),
            ValueValidator::Null => Ok(()),
        }
    }
}

/// Parses a boolean annotation value.
///
/// Exactly `true` and `false` are accepted, in any ASCII casing. Surrounding
/// whitespace, numeric forms and abbreviations (`1`, `t`, `yes`) are rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for anything else.
///
/// # Examples
///
/// ```
/// use annotation_policy::parse_bool;
///
/// assert_eq!(parse_bool("ssl-passthrough", "True"), Ok(true));
/// assert_eq!(parse_bool("ssl-passthrough", "FALSE"), Ok(false));
/// assert!(parse_bool("ssl-passthrough", "maybe").is_err());
/// ```
pub fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::invalid_value(key, "expected 'true' or 'false'"))
    }
}

/// Parses a signed decimal integer annotation value.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the value is not a valid `i64`.
pub fn parse_int(key: &str, value: &str) -> Result<i64, Error> {
    value
        .parse::<i64>()
        .map_err(|e| Error::invalid_value(key, format!("expected an integer ({})", e)))
}

fn validate_options(key: &str, value: &str, options: &[&str]) -> Result<(), Error> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            key,
            format!("expected one of: {}", options.join(", ")),
        ))
    }
}

fn validate_server_name(key: &str, value: &str) -> Result<(), Error> {
    let host = value.strip_prefix("*.").unwrap_or(value);

    if host.is_empty() || value.len() > MAX_SERVER_NAME_LEN {
        return Err(Error::invalid_value(key, "server name has invalid length"));
    }

    let labels_ok = host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    if labels_ok {
        Ok(())
    } else {
        Err(Error::invalid_value(key, "not a valid server name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn bool_accepts_any_casing() {
        for input in ["true", "TRUE", "True", "tRuE"] {
            assert_eq!(parse_bool("k", input), Ok(true), "input {:?}", input);
        }
        for input in ["false", "FALSE", "False", "fAlSe"] {
            assert_eq!(parse_bool("k", input), Ok(false), "input {:?}", input);
        }
    }

    #[test]
    fn bool_rejects_other_forms() {
        for input in ["", "1", "0", "t", "f", "yes", "no", " true", "true ", "maybe"] {
            let err = parse_bool("k", input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidValue, "input {:?}", input);
        }
    }

    #[test]
    fn int_parses_signed_values() {
        assert_eq!(parse_int("k", "42"), Ok(42));
        assert_eq!(parse_int("k", "-7"), Ok(-7));
        assert!(parse_int("k", "4.2").is_err());
        assert!(parse_int("k", "").is_err());
    }

    #[test]
    fn options_are_case_sensitive() {
        let validator = ValueValidator::Options(&["HTTP", "HTTPS", "GRPC"]);

        assert!(validator.validate("backend-protocol", "HTTPS").is_ok());
        assert!(validator.validate("backend-protocol", "https").is_err());
        assert!(validator.validate("backend-protocol", "FCGI").is_err());
    }

    #[test]
    fn server_names() {
        let validator = ValueValidator::ServerName;

        assert!(validator.validate("k", "example.com").is_ok());
        assert!(validator.validate("k", "*.example.com").is_ok());
        assert!(validator.validate("k", "a-b.example").is_ok());
        assert!(validator.validate("k", "").is_err());
        assert!(validator.validate("k", "*.").is_err());
        assert!(validator.validate("k", "-bad.example").is_err());
        assert!(validator.validate("k", "a..b").is_err());
        assert!(validator.validate("k", "under_score.example").is_err());
        assert!(validator.validate("k", "bad;rewrite").is_err());
        assert!(validator.validate("k", &"a".repeat(64)).is_err());
    }

    #[test]
    fn null_accepts_anything() {
        assert!(ValueValidator::Null.validate("k", "").is_ok());
        assert!(ValueValidator::Null.validate("k", "anything goes\n").is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the bool validator never panics and only accepts the two literals
            #[test]
            fn proptest_bool_is_total(input in ".*") {
                match parse_bool("k", &input) {
                    Ok(v) => prop_assert_eq!(input.to_ascii_lowercase(), v.to_string()),
                    Err(e) => prop_assert_eq!(e.kind(), ErrorKind::InvalidValue),
                }
            }

            /// Property: validate agrees with parse_bool
            #[test]
            fn proptest_bool_validate_matches_parse(input in ".{0,8}") {
                prop_assert_eq!(
                    ValueValidator::Bool.validate("k", &input).is_ok(),
                    parse_bool("k", &input).is_ok()
                );
            }

            /// Property: every i64 round-trips through the Int validator
            #[test]
            fn proptest_int_accepts_all_i64(n in any::<i64>()) {
                prop_assert_eq!(parse_int("k", &n.to_string()), Ok(n));
            }
        }
    }
}
