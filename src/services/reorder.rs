//! List reordering for the footer, header and page section builders.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{FooterColumn, FooterConfig, FooterLink, HeaderConfig, MenuItem, Section};

/// Anything the builders can drag around by id.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )*
    };
}

identified!(MenuItem, FooterColumn, FooterLink, Section);

/// Moves the element at `from` to `to`, shifting the ones in between.
/// Returns `false` and leaves the list alone when either index is out of
/// range.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

pub fn position<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Drag-and-drop: put `active_id` where `over_id` is.
pub fn move_by_id<T: Identified>(items: &mut Vec<T>, active_id: &str, over_id: &str) -> bool {
    if active_id == over_id {
        return false;
    }
    match (position(items, active_id), position(items, over_id)) {
        (Some(from), Some(to)) => array_move(items, from, to),
        _ => false,
    }
}

/// Up/down buttons. Moving past either end is a no-op.
pub fn move_step<T: Identified>(items: &mut Vec<T>, id: &str, up: bool) -> bool {
    let Some(from) = position(items, id) else {
        return false;
    };
    let to = if up {
        match from.checked_sub(1) {
            Some(to) => to,
            None => return false,
        }
    } else {
        from + 1
    };
    array_move(items, from, to)
}

pub fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let index = position(items, id)?;
    remove_at(items, index)
}

/// Fresh id for an item added in a builder.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Gives every item a unique id. Blank or duplicate ids become the first free
/// `<prefix>-<n>`, counting up from the item's index, so the same document
/// always normalizes to the same ids.
pub fn ensure_ids<T: Identified>(items: &mut [T], prefix: &str) -> bool {
    let taken: HashSet<String> = items.iter().map(|i| i.id().trim().to_string()).collect();
    let mut seen = HashSet::new();
    let mut changed = false;

    for (i, item) in items.iter_mut().enumerate() {
        let id = item.id().trim().to_string();
        if !id.is_empty() && seen.insert(id.clone()) {
            if id != item.id() {
                item.set_id(id);
                changed = true;
            }
            continue;
        }
        let mut n = i;
        let mut candidate = format!("{prefix}-{n}");
        while taken.contains(&candidate) || seen.contains(&candidate) {
            n += 1;
            candidate = format!("{prefix}-{n}");
        }
        seen.insert(candidate.clone());
        item.set_id(candidate);
        changed = true;
    }
    changed
}

/// Assigns ids to columns and their links (`<column id>-link-<n>`).
pub fn normalize_footer(footer: &mut FooterConfig) -> bool {
    let mut changed = ensure_ids(&mut footer.columns, "column");
    for column in &mut footer.columns {
        let prefix = format!("{}-link", column.id);
        changed |= ensure_ids(&mut column.links, &prefix);
    }
    changed
}

pub fn normalize_header(header: &mut HeaderConfig) -> bool {
    let mut changed = ensure_ids(&mut header.menu_items, "menu");
    for item in &mut header.menu_items {
        let prefix = format!("{}-child", item.id);
        changed |= ensure_ids(&mut item.children, &prefix);
    }
    changed
}

pub fn normalize_sections(sections: &mut [Section]) -> bool {
    ensure_ids(sections, "section")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(ids: &[&str]) -> Vec<FooterLink> {
        ids.iter()
            .map(|id| FooterLink {
                id: id.to_string(),
                label: id.to_uppercase(),
                href: format!("/{id}"),
            })
            .collect()
    }

    fn ids(items: &[FooterLink]) -> Vec<&str> {
        items.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_array_move_forward_and_back() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        assert!(array_move(&mut v, 0, 2));
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);
        assert!(array_move(&mut v, 3, 0));
        assert_eq!(v, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_array_move_out_of_range() {
        let mut v = vec![1, 2, 3];
        assert!(!array_move(&mut v, 3, 0));
        assert!(!array_move(&mut v, 0, 7));
        assert_eq!(v, vec![1, 2, 3]);
        let mut empty: Vec<i32> = Vec::new();
        assert!(!array_move(&mut empty, 0, 0));
    }

    #[test]
    fn test_move_by_id() {
        let mut v = links(&["a", "b", "c"]);
        assert!(move_by_id(&mut v, "c", "a"));
        assert_eq!(ids(&v), vec!["c", "a", "b"]);
        assert!(!move_by_id(&mut v, "a", "a"));
        assert!(!move_by_id(&mut v, "missing", "a"));
        assert_eq!(ids(&v), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_step_at_edges() {
        let mut v = links(&["a", "b"]);
        assert!(!move_step(&mut v, "a", true));
        assert!(!move_step(&mut v, "b", false));
        assert!(move_step(&mut v, "b", true));
        assert_eq!(ids(&v), vec!["b", "a"]);
    }

    #[test]
    fn test_remove() {
        let mut v = links(&["a", "b", "c"]);
        assert!(remove_at(&mut v, 5).is_none());
        assert_eq!(remove_by_id(&mut v, "b").map(|l| l.id), Some("b".to_string()));
        assert_eq!(ids(&v), vec!["a", "c"]);
    }

    #[test]
    fn test_ensure_ids_fills_blanks_and_duplicates() {
        let mut v = links(&["", "x", "x", "link-0"]);
        assert!(ensure_ids(&mut v, "link"));
        let got: HashSet<&str> = v.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(got.len(), 4);
        assert_eq!(v[1].id, "x");
        assert_eq!(v[2].id, "link-2");
        assert_eq!(v[3].id, "link-0");
        assert_eq!(v[0].id, "link-1");
        assert!(!ensure_ids(&mut v, "link"));
    }

    #[test]
    fn test_ensure_ids_is_stable_across_loads() {
        let legacy = || FooterConfig {
            columns: vec![
                FooterColumn {
                    id: String::new(),
                    title: "A".to_string(),
                    links: links(&["", "column-0-link-0"]),
                },
                FooterColumn {
                    id: "column-0".to_string(),
                    title: "B".to_string(),
                    links: Vec::new(),
                },
            ],
            ..FooterConfig::default()
        };

        let mut first = legacy();
        let mut second = legacy();
        assert!(normalize_footer(&mut first));
        assert!(normalize_footer(&mut second));
        assert_eq!(first.columns[0].id, "column-1");
        assert_eq!(first.columns[0].id, second.columns[0].id);
        assert_eq!(ids(&first.columns[0].links), ids(&second.columns[0].links));
        assert_eq!(ids(&first.columns[0].links), vec!["column-1-link-0", "column-0-link-0"]);
    }

    #[test]
    fn test_ensure_ids_trims_whitespace() {
        let mut v = links(&[" a "]);
        assert!(ensure_ids(&mut v, "link"));
        assert_eq!(v[0].id, "a");
    }

    #[test]
    fn test_normalize_footer_prefixes_links_by_column() {
        let mut footer = FooterConfig {
            columns: vec![FooterColumn {
                id: String::new(),
                title: "Links".to_string(),
                links: links(&["", ""]),
            }],
            ..FooterConfig::default()
        };
        assert!(normalize_footer(&mut footer));
        assert_eq!(footer.columns[0].id, "column-0");
        assert_eq!(ids(&footer.columns[0].links), vec!["column-0-link-0", "column-0-link-1"]);
    }

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id("menu");
        assert!(a.starts_with("menu-"));
        assert_ne!(a, new_id("menu"));
    }
}
