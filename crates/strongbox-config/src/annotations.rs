use std::any::type_name;

use documented::{Documented, DocumentedFields};
use toml_edit::{Decor, Item, RawString, Table};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// Renders `docs` as `#` comment lines and appends them to the prefix of `decor`.
///
/// An existing comment block is separated from the new one by an empty `#` line.
pub fn append_docs_as_toml_comments(decor: &mut Decor, docs: &str) {
    let comments: String = docs
        .lines()
        .map(|line| match line {
            "" => "#\n".to_string(),
            line => format!("# {line}\n"),
        })
        .collect();

    let prefix = match decor.prefix().and_then(RawString::as_str) {
        None | Some("") => comments,
        Some(existing) => match existing.lines().last() {
            None | Some("") => format!("{existing}{comments}"),
            Some(_) => format!("{existing}#\n{comments}"),
        },
    };
    decor.set_prefix(prefix);
}

/// Writes the field docs of `T` as comments above the matching keys of `table`.
///
/// Keys with no documented field are left bare and logged.
pub fn annotate_toml_table<T>(table: &mut Table) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    for (mut key, item) in table.iter_mut() {
        let name = key.get().to_string();
        let Ok(docs) = T::get_field_docs(&name) else {
            warn!(
                "Field '{}' has no documentation in '{}'",
                name,
                type_name::<T>()
            );
            continue;
        };

        match item {
            Item::None => return Err(ConfigError::UnexpectedTomlItem(name)),
            Item::Value(_) => append_docs_as_toml_comments(key.leaf_decor_mut(), docs),
            Item::Table(sub_table) => append_docs_as_toml_comments(sub_table.decor_mut(), docs),
            Item::ArrayOfTables(_) => return Err(ConfigError::UnexpectedTomlItem(name)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use toml_edit::Decor;

    use super::*;

    fn prefix(decor: &Decor) -> String {
        decor
            .prefix()
            .and_then(|p| p.as_str())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_append_docs_as_toml_comments() {
        let mut decor = Decor::new("", "");
        append_docs_as_toml_comments(&mut decor, "Graph snapshot\n\nDefault: none");

        assert_eq!(prefix(&decor), "# Graph snapshot\n#\n# Default: none\n");
    }

    #[test]
    fn test_append_docs_separates_existing_comments() {
        let mut decor = Decor::new("# existing\n", "");
        append_docs_as_toml_comments(&mut decor, "added");

        assert_eq!(prefix(&decor), "# existing\n#\n# added\n");
    }
}
