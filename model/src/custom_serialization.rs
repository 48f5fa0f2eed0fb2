use serde::de;
use std::fmt;

struct U64Visitor;

impl<'de> de::Visitor<'de> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a u64, either as a number or a decimal string")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v < 0 {
            return Err(de::Error::invalid_value(de::Unexpected::Signed(v), &self));
        }
        Ok(v as u64)
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        s.parse::<u64>()
            .map_err(|_e| de::Error::invalid_value(de::Unexpected::Str(s), &self))
    }
}

/// The api sends 64 bit integers as strings so javascript clients don't lose precision,
/// but a few older fields are still plain numbers, so accept both.
pub fn u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: de::Deserializer<'de>,
{
    deserializer.deserialize_any(U64Visitor)
}

pub fn u64_to_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "super::u64_from_string")]
        value: u64,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let from_str: Wrapper = serde_json::from_str(r#"{"value":"18446744073709551615"}"#).unwrap();
        assert_eq!(from_str.value, u64::MAX);
        let from_num: Wrapper = serde_json::from_str(r#"{"value":42}"#).unwrap();
        assert_eq!(from_num.value, 42);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":-1}"#).is_err());
    }
}
