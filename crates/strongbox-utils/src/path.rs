//! Expansion of user-supplied paths and the XDG base directories.

use std::{env, path::PathBuf};

use crate::error::{PathError, PathResult};

fn env_dir(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `$HOME`, or the system temp directory when it is unset.
fn home_dir() -> PathBuf {
    env_dir("HOME").unwrap_or_else(env::temp_dir)
}

pub fn xdg_config_home() -> PathBuf {
    env_dir("XDG_CONFIG_HOME").unwrap_or_else(|| home_dir().join(".config"))
}

pub fn xdg_data_home() -> PathBuf {
    env_dir("XDG_DATA_HOME").unwrap_or_else(|| home_dir().join(".local/share"))
}

/// Substitutes every `$NAME` and `${NAME}` in `input` from the environment.
///
/// A `$` (or `${}`) without a name is kept as is.
fn expand_vars(input: &str) -> PathResult<String> {
    let mut expanded = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dollar) = rest.find('$') {
        expanded.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, tail) = match after.strip_prefix('{') {
            Some(braced) => {
                let close = braced
                    .find('}')
                    .ok_or_else(|| PathError::UnclosedVariable(input.to_string()))?;
                (&braced[..close], &braced[close + 1..])
            }
            None => {
                let end = after
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                after.split_at(end)
            }
        };

        if name.is_empty() {
            expanded.push_str(&rest[dollar..rest.len() - tail.len()]);
        } else {
            let value = env::var(name).map_err(|_| PathError::MissingEnvVar {
                var: name.to_string(),
                input: input.to_string(),
            })?;
            expanded.push_str(&value);
        }
        rest = tail;
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Turns a configured or command-line path into an absolute one.
///
/// A leading `~` means the home directory, environment variables are expanded, and
/// relative results are taken from the current directory.
pub fn resolve_path(path: &str) -> PathResult<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let path = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{}", home_dir().display(), expand_vars(rest)?)
        }
        _ => expand_vars(path)?,
    };

    let path = PathBuf::from(path);
    if path.is_absolute() {
        return Ok(path);
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(PathError::CurrentDir)
}
