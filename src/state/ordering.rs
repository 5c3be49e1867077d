//! Display order of preset names.
//!
//! Built-ins come first in their fixed order, then `Custom`, then every
//! other name. Names sharing a bucket keep the collection's order.

use super::collection::PresetCollection;
use super::schema::{BUILTIN_PRESETS, CUSTOM_PRESET};

/// Bucket for user-created presets
const USER_PRIORITY: usize = BUILTIN_PRESETS.len() + 2;

/// Sort bucket for a preset name (lower sorts first)
pub fn sort_priority(name: &str) -> usize {
    if let Some(i) = BUILTIN_PRESETS.iter().position(|b| *b == name) {
        return i + 1;
    }
    if name == CUSTOM_PRESET {
        return BUILTIN_PRESETS.len() + 1;
    }
    USER_PRIORITY
}

/// Order arbitrary names into display order
pub fn order_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<String> = names.into_iter().map(str::to_string).collect();
    // stable: ties keep their incoming order
    ordered.sort_by_key(|name| sort_priority(name));
    ordered
}

/// Display order of every preset in `presets`
pub fn preset_names(presets: &PresetCollection) -> Vec<String> {
    order_names(presets.names())
}
