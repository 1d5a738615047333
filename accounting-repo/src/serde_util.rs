use serde::{Deserialize, Deserializer};

/// For fields deserialized into a double Option: the outer Option tracks
/// presence of the field in the payload, the inner one its value.
pub(crate) fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
