use tilegrid_core::Item;

// ──────────────────────────────────────────────
// Snapshots and change detection
// ──────────────────────────────────────────────

/// Copy a list of items into a fresh snapshot.
pub fn clone_items(source: &[Item]) -> Vec<Item> {
    source.to_vec()
}

/// Overwrite `dest` with `source` entry by entry, reusing existing slots.
pub fn clone_items_into(source: &[Item], dest: &mut Vec<Item>) {
    dest.truncate(source.len());
    for (index, item) in source.iter().enumerate() {
        match dest.get_mut(index) {
            Some(slot) => slot.clone_from(item),
            None => dest.push(item.clone()),
        }
    }
}

/// Items whose position or size differs from `previous`, matched by id.
///
/// Current items missing from `previous` are reported as added; entries of
/// `previous` missing from `current` are reported (with their old geometry)
/// as removed.
pub fn changed_items(current: &[Item], previous: &[Item]) -> Vec<Item> {
    changed_items_by(current, previous, |item| item.id.clone())
}

/// Same as [`changed_items`], correlating entries through `key`.
pub fn changed_items_by<K, F>(current: &[Item], previous: &[Item], key: F) -> Vec<Item>
where
    K: PartialEq,
    F: Fn(&Item) -> K,
{
    let mut changed = Vec::new();
    for item in current {
        let k = key(item);
        match previous.iter().find(|before| key(before) == k) {
            Some(before) if before.same_geometry(item) => {}
            _ => changed.push(item.clone()),
        }
    }
    for before in previous {
        let k = key(before);
        if !current.iter().any(|item| key(item) == k) {
            changed.push(before.clone());
        }
    }
    changed
}
