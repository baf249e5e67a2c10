use std::path::Path;

use crate::dumper::fetch_units;
use crate::dumper::test_helpers::{emoji, guild, three_guild_inventory};
use crate::types::EmojiInventory;

const BASE: &str = "https://cdn.example.com";

#[test]
fn flattening_preserves_guild_then_emoji_order() {
    let inventory = three_guild_inventory(BASE);
    let units: Vec<_> = fetch_units(&inventory, Path::new("/tmp/emojis")).collect();

    assert_eq!(units.len(), 7, "3 guilds with 2 + 0 + 5 emojis");
    let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        ["smile", "party", "wave", "think", "dance", "sleep", "fire"]
    );
    assert!(units.iter().take(2).all(|u| u.guild == "Alpha Team"));
    assert!(units.iter().skip(2).all(|u| u.guild == "Gamma Guild"));
}

#[test]
fn target_path_is_guild_slug_dot_emoji_slug_dot_suffix() {
    let inventory = EmojiInventory {
        guilds: vec![guild(
            "My Server!! v2.0",
            vec![emoji(BASE, "Happy Cat", false), emoji(BASE, "dance", true)],
        )],
    };
    let units: Vec<_> = fetch_units(&inventory, Path::new("/out")).collect();

    assert_eq!(
        units[0].target,
        Path::new("/out/my-server-v2-0.happy-cat.png")
    );
    assert_eq!(units[1].target, Path::new("/out/my-server-v2-0.dance.gif"));
}

#[test]
fn empty_inventory_yields_no_units() {
    let inventory = EmojiInventory::default();
    assert_eq!(fetch_units(&inventory, Path::new("/out")).count(), 0);
}

// "Team A" and "Team.A" were distinct guilds on the platform but slugify to
// the same string, so their identically-named emojis share a target path.
// Accepted: last writer wins.
#[test]
fn colliding_slugs_share_a_target_path() {
    let inventory = EmojiInventory {
        guilds: vec![
            guild("Team A", vec![emoji(BASE, "wave", false)]),
            guild("Team.A", vec![emoji(BASE, "wave", false)]),
        ],
    };
    let units: Vec<_> = fetch_units(&inventory, Path::new("/out")).collect();
    assert_eq!(units[0].target, units[1].target);
}

#[test]
fn label_matches_target_file_stem() {
    let inventory = EmojiInventory {
        guilds: vec![guild("Alpha Team", vec![emoji(BASE, "smile", false)])],
    };
    let unit = fetch_units(&inventory, Path::new("/out")).next().unwrap();
    assert_eq!(unit.label(), "alpha-team.smile");
    assert_eq!(
        unit.target.file_name().unwrap().to_str().unwrap(),
        "alpha-team.smile.png"
    );
}
