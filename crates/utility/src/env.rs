use std::{env, fmt::Display, str::FromStr};

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("environment variable `{0}` is not set")]
    Missing(&'static str),

    #[error("environment variable `{name}` has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub fn required(name: &'static str) -> Result<String, EnvError> {
    env::var(name).map_err(|_| EnvError::Missing(name))
}

pub fn required_parsed<T>(name: &'static str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    parse(name, required(name)?)
}

/// Reads and parses `name`, falling back to `default` when it is unset.
pub fn optional_parsed<T>(name: &'static str, default: T) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(value) => parse(name, value),
        Err(_) => Ok(default),
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|why: T::Err| EnvError::Invalid {
        name,
        reason: why.to_string(),
        value,
    })
}
