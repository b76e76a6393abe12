#[cfg(test)]
mod tests {
    use crate::{
        Axes, Direction, Footprint, GridOptions, GridPos, Item, ItemAttributes, OptionsError,
        Rect, Vec2,
    };

    // ──────────────────────────────────────────
    // Axes
    // ──────────────────────────────────────────

    #[test]
    fn test_vertical_axes_use_x_as_lane() {
        let axes = Axes::new(Direction::Vertical);
        let item = Item::new("a", 1, 3, 2, 4);
        let fp = axes.footprint(&item).unwrap();
        assert_eq!(
            fp,
            Footprint { lane: 1, scroll: 3, lane_span: 2, scroll_span: 4 }
        );
        assert_eq!(axes.pos(1, 3), GridPos::new(1, 3));
    }

    #[test]
    fn test_horizontal_axes_use_y_as_lane() {
        let axes = Axes::new(Direction::Horizontal);
        let item = Item::new("a", 1, 3, 2, 4);
        let fp = axes.footprint(&item).unwrap();
        assert_eq!(
            fp,
            Footprint { lane: 3, scroll: 1, lane_span: 4, scroll_span: 2 }
        );
        assert_eq!(axes.pos(3, 1), GridPos::new(1, 3));
    }

    #[test]
    fn test_set_lane_span_follows_direction() {
        let mut item = Item::new("a", 0, 0, 2, 2);
        Axes::new(Direction::Vertical).set_lane_span(&mut item, 5);
        assert_eq!((item.w, item.h), (5, 2));
        Axes::new(Direction::Horizontal).set_lane_span(&mut item, 3);
        assert_eq!((item.w, item.h), (5, 3));
    }

    #[test]
    fn test_positionless_item_has_no_footprint() {
        let axes = Axes::new(Direction::Vertical);
        assert!(axes.footprint(&Item::positionless("a", 1, 1)).is_none());
    }

    #[test]
    fn test_footprint_overlap_is_exclusive_at_edges() {
        let a = Footprint { lane: 0, scroll: 0, lane_span: 2, scroll_span: 1 };
        let touching = Footprint { lane: 2, scroll: 0, lane_span: 2, scroll_span: 1 };
        let below = Footprint { lane: 0, scroll: 1, lane_span: 2, scroll_span: 1 };
        let crossing = Footprint { lane: 1, scroll: 0, lane_span: 2, scroll_span: 3 };
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    // ──────────────────────────────────────────
    // Declared attributes
    // ──────────────────────────────────────────

    #[test]
    fn test_attributes_parse_into_item() {
        let item = ItemAttributes::new("tile-1").at(2, 5).sized(3, 2).to_item();
        assert_eq!(item, Item::new("tile-1", 2, 5, 3, 2));
    }

    #[test]
    fn test_missing_coordinate_makes_item_positionless() {
        let mut attrs = ItemAttributes::new("t").sized(2, 2);
        attrs.x = Some("1".into());
        let item = attrs.to_item();
        assert!(!item.is_positioned());
        assert_eq!((item.w, item.h), (2, 2));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let attrs = ItemAttributes {
            id: "t".into(),
            x: Some("NaN".into()),
            y: Some("0".into()),
            w: Some("0".into()),
            h: Some("-3".into()),
        };
        let item = attrs.to_item();
        assert!(item.pos.is_none());
        assert_eq!((item.w, item.h), (1, 1));
    }

    #[test]
    fn test_attributes_read_leading_digits() {
        let attrs = ItemAttributes {
            id: "t".into(),
            x: Some("2.5".into()),
            y: Some(" 3px".into()),
            w: Some("+4".into()),
            h: Some("px2".into()),
        };
        let item = attrs.to_item();
        assert_eq!(item.pos, Some(GridPos::new(2, 3)));
        assert_eq!((item.w, item.h), (4, 1));
    }

    #[test]
    fn test_footprint_edges_saturate() {
        let fp = Footprint { lane: 0, scroll: u32::MAX, lane_span: 1, scroll_span: 2 };
        assert_eq!(fp.scroll_end(), u32::MAX);
        assert_eq!(fp.lane_end(), 1);
    }

    #[test]
    fn test_same_geometry_ignores_id() {
        assert!(Item::new("a", 1, 1, 2, 2).same_geometry(&Item::new("b", 1, 1, 2, 2)));
        assert!(!Item::new("a", 1, 1, 2, 2).same_geometry(&Item::new("a", 1, 2, 2, 2)));
    }

    // ──────────────────────────────────────────
    // Options
    // ──────────────────────────────────────────

    #[test]
    fn test_options_defaults_from_empty_json() {
        let options = GridOptions::from_json("{}").unwrap();
        assert_eq!(options, GridOptions::default());
        assert_eq!(options.lanes, 5);
        assert_eq!(options.direction, Direction::Vertical);
    }

    #[test]
    fn test_options_camel_case_fields() {
        let json = r#"{
            "lanes": 12,
            "direction": "horizontal",
            "widthHeightRatio": 1.5,
            "readOnly": true,
            "heightToFontSizeRatio": 0.25
        }"#;
        let options = GridOptions::from_json(json).unwrap();
        assert_eq!(options.lanes, 12);
        assert_eq!(options.direction, Direction::Horizontal);
        assert_eq!(options.width_height_ratio, 1.5);
        assert!(options.read_only);
        assert_eq!(options.height_to_font_size_ratio, Some(0.25));
    }

    #[test]
    fn test_options_reject_zero_lanes() {
        let err = GridOptions::from_json(r#"{"lanes": 0}"#).unwrap_err();
        assert!(matches!(err, OptionsError::ZeroLanes));
    }

    #[test]
    fn test_options_reject_bad_ratio() {
        let err = GridOptions::from_json(r#"{"widthHeightRatio": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::InvalidRatio { name: "widthHeightRatio", .. }
        ));
    }

    #[test]
    fn test_options_sanitized_replaces_invalid_fields() {
        let options = GridOptions {
            lanes: 0,
            width_height_ratio: f32::NAN,
            height_to_font_size_ratio: Some(-1.0),
            read_only: true,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(options.lanes, 1);
        assert_eq!(options.width_height_ratio, 1.0);
        assert_eq!(options.height_to_font_size_ratio, None);
        assert!(options.read_only);
        assert!(options.validate().is_ok());

        let valid = GridOptions { width_height_ratio: 2.0, ..GridOptions::with_lanes(3) };
        assert_eq!(valid.clone().sanitized(), valid);
    }

    #[test]
    fn test_options_report_parse_errors() {
        let err = GridOptions::from_json(r#"{"direction": "diagonal"}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Parse(_)));
    }

    // ──────────────────────────────────────────
    // Geometry
    // ──────────────────────────────────────────

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Vec2::new(10.0, 30.0)));
        assert!(!rect.contains(Vec2::new(9.9, 15.0)));
    }
}
