mod common;

#[cfg(test)]
pub mod builder_tests {
    use super::common::*;

    use socialit::models::{FooterConfig, HeaderConfig, MenuItem};
    use socialit::services::reorder::*;

    fn column_ids(footer: &FooterConfig) -> Vec<&str> {
        footer.columns.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_drag_column_over_first() {
        let mut footer = FooterConfig::default();
        assert!(move_by_id(&mut footer.columns, "column-2", "column-0"));
        assert_eq!(column_ids(&footer), vec!["column-2", "column-0", "column-1"]);
    }

    #[test]
    fn test_step_past_either_end_is_noop() {
        let mut footer = FooterConfig::default();
        assert!(!move_step(&mut footer.columns, "column-0", true));
        assert!(!move_step(&mut footer.columns, "column-2", false));
        assert!(move_step(&mut footer.columns, "column-2", true));
        assert_eq!(column_ids(&footer), vec!["column-0", "column-2", "column-1"]);
    }

    #[test]
    fn test_links_move_within_their_column() {
        let mut footer = FooterConfig {
            columns: vec![footer_column("a", &["x", "y", "z"]), footer_column("b", &["w"])],
            ..FooterConfig::default()
        };
        let links = &mut footer.columns[0].links;
        assert!(move_by_id(links, "z", "x"));
        let ids: Vec<_> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);

        // A link from another column is not found here.
        assert!(!move_by_id(&mut footer.columns[0].links, "w", "x"));
    }

    #[test]
    fn test_normalize_footer_repairs_ids() {
        let mut footer = FooterConfig {
            columns: vec![
                footer_column("", &["", ""]),
                footer_column("dup", &[]),
                footer_column("dup", &[]),
            ],
            ..FooterConfig::default()
        };

        assert!(normalize_footer(&mut footer));
        assert_eq!(footer.columns[0].id, "column-0");
        assert_eq!(footer.columns[0].links[0].id, "column-0-link-0");
        assert_eq!(footer.columns[0].links[1].id, "column-0-link-1");
        assert_eq!(footer.columns[1].id, "dup");
        assert_eq!(footer.columns[2].id, "column-2");
        assert!(!normalize_footer(&mut footer));
    }

    #[test]
    fn test_header_menu_add_and_remove() {
        let mut header = HeaderConfig::default();
        let before = header.menu_items.len();
        let id = new_id("menu");
        header.menu_items.push(MenuItem::link(id.clone(), "Pricing", "/pricing"));

        assert!(!normalize_header(&mut header));
        assert_eq!(position(&header.menu_items, &id), Some(before));

        let removed = remove_by_id(&mut header.menu_items, &id).unwrap();
        assert_eq!(removed.label, "Pricing");
        assert_eq!(header.menu_items.len(), before);
        assert!(remove_by_id(&mut header.menu_items, &id).is_none());
    }
}
