/// Numbers the ticker endpoint encodes as JSON strings, e.g. `"price_usd": "573.137"`.
///
/// Use with `#[serde(with = "stringified")]`. The string must hold a plain JSON number
/// literal: no surrounding whitespace, no leading `+`, no `NaN` or `inf`. A JSON `null`
/// decodes to the type's zero value, which is how the API reports unknown figures for
/// thinly traded assets. Serialization writes the value back as a string.
pub mod stringified {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Default,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(T::default());
        };

        if !is_number_literal(&raw) {
            return Err(de::Error::custom(format!("invalid number {raw:?}")));
        }

        raw.parse()
            .map_err(|e| de::Error::custom(format!("invalid number {raw:?}: {e}")))
    }

    // JSON number grammar: -?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?
    fn is_number_literal(raw: &str) -> bool {
        let bytes = raw.strip_prefix('-').unwrap_or(raw).as_bytes();
        let mut i = 0;

        let digits = |i: &mut usize| {
            let start = *i;
            while *i < bytes.len() && bytes[*i].is_ascii_digit() {
                *i += 1;
            }
            *i > start
        };

        match bytes.first() {
            Some(b'0') => i = 1,
            Some(b'1'..=b'9') => {
                digits(&mut i);
            }
            _ => return false,
        }

        if bytes.get(i) == Some(&b'.') {
            i += 1;
            if !digits(&mut i) {
                return false;
            }
        }

        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            i += 1;
            if matches!(bytes.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            if !digits(&mut i) {
                return false;
            }
        }

        i == bytes.len()
    }
}
