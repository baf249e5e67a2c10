//! Fetch unit derivation: flattening the enumerated inventory into jobs.

use std::path::{Path, PathBuf};

use crate::slug::filename_slug;
use crate::types::EmojiInventory;

/// One dispatched download job, derived 1:1 from an enumerated emoji.
///
/// Carries everything the fetch engine needs: the names (for logging), the
/// CDN URL, and the pre-computed target path
/// `<output_dir>/<guild-slug>.<emoji-slug>.<png|gif>`.
///
/// Target paths are unique across a run as long as no two `(guild, name)`
/// pairs slugify to the same strings; colliding pairs overwrite each other,
/// last writer wins (see [`filename_slug`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchUnit {
    /// Guild the emoji belongs to (display name, not slug)
    pub guild: String,
    /// Emoji display name
    pub name: String,
    /// CDN URL the binary content is fetched from
    pub url: String,
    /// Where the fetched bytes are written
    pub target: PathBuf,
}

impl FetchUnit {
    /// `<guild-slug>.<emoji-slug>` label used in log lines
    pub fn label(&self) -> String {
        format!("{}.{}", filename_slug(&self.guild), filename_slug(&self.name))
    }
}

/// Flatten the guild → emojis mapping into a single lazy, ordered stream of
/// fetch units.
///
/// Preserves guild order, then within-guild emoji order; performs no I/O.
/// Order only matters for deterministic progress reporting.
pub fn fetch_units<'a>(
    inventory: &'a EmojiInventory,
    output_dir: &'a Path,
) -> impl Iterator<Item = FetchUnit> + 'a {
    inventory.guilds.iter().flat_map(move |guild| {
        guild.emojis.iter().map(move |emoji| {
            let file_name = format!(
                "{}.{}.{}",
                filename_slug(&guild.guild),
                filename_slug(&emoji.name),
                emoji.suffix()
            );
            FetchUnit {
                guild: guild.guild.clone(),
                name: emoji.name.clone(),
                url: emoji.url.clone(),
                target: output_dir.join(file_name),
            }
        })
    })
}
