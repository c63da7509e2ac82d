use std::str::FromStr;

use strum::IntoEnumIterator;

/// Canonical spelling of every variant, comma separated, for error messages.
pub fn variant_list<T>() -> String
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse `raw` as a `T`, or describe what would have been accepted.
pub fn parse_variant<T>(raw: &str) -> std::result::Result<T, String>
where
    T: IntoEnumIterator + AsRef<str> + FromStr,
{
    T::from_str(raw.trim()).map_err(|_| variant_list::<T>())
}
