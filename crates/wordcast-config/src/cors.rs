use std::time::Duration;

use serde::Deserialize;

/// CORS configuration
///
/// Browsers play the returned audio URL directly, so the usual deployment
/// only needs to open `POST /tts/` to the front-end origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins ("*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed methods ("*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrArray,
    /// Allowed request headers ("*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrArray,
    /// Allow credentials
    #[serde(default)]
    pub credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either a wildcard or an explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAnyOrArray")]
pub enum AnyOrArray {
    #[default]
    Any,
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnyOrArray {
    One(String),
    Many(Vec<String>),
}

impl From<RawAnyOrArray> for AnyOrArray {
    fn from(raw: RawAnyOrArray) -> Self {
        let values = match raw {
            RawAnyOrArray::One(value) => vec![value],
            RawAnyOrArray::Many(values) => values,
        };

        if values.iter().any(|value| value == "*") {
            Self::Any
        } else {
            Self::List(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        value: AnyOrArray,
    }

    fn parse(input: &str) -> AnyOrArray {
        toml::from_str::<Wrapper>(input).unwrap().value
    }

    #[test]
    fn wildcard_string() {
        assert_eq!(parse("value = \"*\""), AnyOrArray::Any);
    }

    #[test]
    fn wildcard_inside_list_wins() {
        assert_eq!(parse("value = [\"https://a.example\", \"*\"]"), AnyOrArray::Any);
    }

    #[test]
    fn single_origin() {
        assert_eq!(
            parse("value = \"https://a.example\""),
            AnyOrArray::List(vec!["https://a.example".to_owned()])
        );
    }

    #[test]
    fn explicit_list() {
        assert_eq!(
            parse("value = [\"GET\", \"POST\"]"),
            AnyOrArray::List(vec!["GET".to_owned(), "POST".to_owned()])
        );
    }
}
