//! Plugin config template rendering.
//!
//! Renders the CopyQ plugin script from its `{{ key }}` template. Simple
//! regex substitution, no logic in the template.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Banner substituted into the rendered file so nobody edits it by hand.
pub const AUTOGENERATED_WARNING: &str = "WARNING: this file is generated automatically. \
     Changes will not persist. Change the template file or generator code itself to persist changes";

/// Inputs for one plugin render.
#[derive(Clone, Debug)]
pub struct PluginParams {
    /// Directory the plugin searches for emojis in
    pub emoji_dir: PathBuf,
    /// Maximum number of emojis the plugin loads into the clipboard
    pub emoji_load_limit: u32,
    /// Display name of the command inside CopyQ
    pub command_name: String,
    /// Keyboard shortcut that triggers the command
    pub command_shortcut: String,
}

/// Substitute every `{{ key }}` placeholder in `template` from `vars`.
///
/// # Errors
///
/// Returns [`Error::Template`] if the template references a key that `vars`
/// does not provide; a silently-empty substitution would produce a broken
/// plugin.
pub fn render_template(template: &str, vars: &HashMap<&str, String>) -> Result<String> {
    let placeholder = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
        .map_err(|e| Error::Template(format!("invalid placeholder pattern: {e}")))?;

    let mut missing_key = None;
    let rendered = placeholder.replace_all(template, |caps: &Captures<'_>| {
        let key = &caps[1];
        match vars.get(key) {
            Some(value) => value.clone(),
            None => {
                missing_key.get_or_insert_with(|| key.to_string());
                String::new()
            }
        }
    });

    match missing_key {
        Some(key) => Err(Error::Template(format!(
            "template references unknown key {key:?}"
        ))),
        None => Ok(rendered.into_owned()),
    }
}

/// Render the plugin template at `template_path` into `output_path`.
///
/// # Errors
///
/// Returns an error if the template cannot be read, references an unknown
/// key, or the output cannot be written.
pub fn generate_plugin(
    template_path: &Path,
    output_path: &Path,
    params: &PluginParams,
) -> Result<()> {
    let template = std::fs::read_to_string(template_path)?;

    let vars = HashMap::from([
        ("emoji_dir", params.emoji_dir.display().to_string()),
        ("emoji_load_limit", params.emoji_load_limit.to_string()),
        ("command_name", params.command_name.clone()),
        ("command_shortcut", params.command_shortcut.clone()),
        ("autogenerated_warning", AUTOGENERATED_WARNING.to_string()),
    ]);

    let rendered = render_template(&template, &vars)?;
    std::fs::write(output_path, rendered)?;

    tracing::info!(
        template = %template_path.display(),
        output = %output_path.display(),
        "plugin rendered"
    );
    Ok(())
}
