use crate::value::AttrValue;

/// Rebuilds a per-element array from an origin map: `new[i] = old[origin[i]]`.
///
/// Origins may repeat (edge duplication) or skip entries (deletion, collapse).
pub(crate) fn remap_array(values: &[AttrValue], origin: &[usize]) -> Vec<AttrValue> {
    origin
        .iter()
        .map(|&old| values.get(old).cloned().unwrap_or_default())
        .collect()
}

pub(crate) fn grow_array(values: &mut Vec<AttrValue>, additional: usize) {
    values.resize(values.len() + additional, AttrValue::Null);
}
