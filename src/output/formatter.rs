use std::path::{Component, Path};

use crate::error::{Error, Result};
use crate::generator::ddl_generator::GeneratedDdl;

/// Write one `{name}_{dialect}.sql` file per generated statement.
pub fn write_output(output_dir: &Path, name: &str, ddls: &[GeneratedDdl]) -> Result<()> {
    validate_output_name(name)?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| Error::Output(format!("Failed to create output directory: {e}")))?;

    for ddl in ddls {
        let path = output_dir.join(format!("{name}_{}.sql", ddl.dialect.trim().to_lowercase()));
        std::fs::write(&path, format!("{}\n", ddl.ddl))
            .map_err(|e| Error::Output(format!("Failed to write {}: {e}", path.display())))?;
    }

    Ok(())
}

/// Render statements for a terminal: a lone statement as-is, several with a
/// `-- {label}` header each and a blank line between them.
pub fn format_ddls(ddls: &[GeneratedDdl]) -> String {
    match ddls {
        [single] => single.ddl.clone(),
        _ => ddls
            .iter()
            .map(|d| format!("-- {}\n{}", d.label, d.ddl))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn validate_output_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Output("Output name must not be empty".to_string()));
    }
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        return Err(Error::Output(format!(
            "Invalid output name '{name}': absolute paths are not allowed"
        )));
    }
    if candidate.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) {
        return Err(Error::Output(format!(
            "Invalid output name '{name}': traversal segments are not allowed"
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::Output(format!(
            "Invalid output name '{name}': path separators are not allowed"
        )));
    }
    Ok(())
}
