use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

/// Reads an optional variable through `lookup` and parses it, falling back to `default`.
pub fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Unable to parse {key} from '{raw}'")),
        None => Ok(default),
    }
}

pub fn parse_bool_strict<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref() {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

pub fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_or_uses_default_when_missing() {
        let lookup = source(&[]);
        assert_eq!(parse_or(&lookup, "PORT", 8080u16).unwrap(), 8080);
    }

    #[test]
    fn parse_or_rejects_garbage() {
        let lookup = source(&[("PORT", "eighty")]);
        let err = parse_or(&lookup, "PORT", 8080u16).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn strict_bool_only_accepts_true_or_false() {
        let lookup = source(&[("RUN_MIGRATIONS", "yes")]);
        assert!(parse_bool_strict(&lookup, "RUN_MIGRATIONS", true).is_err());

        let lookup = source(&[("RUN_MIGRATIONS", "false")]);
        assert!(!parse_bool_strict(&lookup, "RUN_MIGRATIONS", true).unwrap());
    }

    #[test]
    fn flag_accepts_one_and_true() {
        assert!(flag(&source(&[("DEV_MODE", "1")]), "DEV_MODE"));
        assert!(flag(&source(&[("DEV_MODE", "true")]), "DEV_MODE"));
        assert!(!flag(&source(&[("DEV_MODE", "yes")]), "DEV_MODE"));
        assert!(!flag(&source(&[]), "DEV_MODE"));
    }
}
