use serde::{Deserialize, Deserializer};

// query strings come in as text; anything that isn't an integer is treated as absent,
// so `?page=abc` falls back to the default page instead of failing the request
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse::<i64>().ok()))
}
