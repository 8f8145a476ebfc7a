use crate::layout::OverlayItem;

/// Index of the first item containing the view point.
#[inline]
pub fn hit_test(items: &[OverlayItem], x: f32, y: f32) -> Option<usize> {
    items.iter().position(|item| item.rect.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_app::RectF;

    fn item(index: usize, x: f32, y: f32, w: f32, h: f32) -> OverlayItem {
        OverlayItem {
            index,
            rect: RectF::from_xywh(x, y, w, h),
            text: format!("item{index}"),
            font_size: 10.0,
            text_x: x + 6.0,
            text_y: y + 6.0,
        }
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let items = vec![item(0, 0.0, 0.0, 100.0, 50.0), item(1, 50.0, 25.0, 100.0, 50.0)];
        assert_eq!(hit_test(&items, 60.0, 30.0), Some(0));
        assert_eq!(hit_test(&items, 120.0, 60.0), Some(1));
        assert_eq!(hit_test(&items, 300.0, 300.0), None);
    }

    #[test]
    fn right_and_bottom_edges_are_outside() {
        let items = vec![item(0, 0.0, 0.0, 10.0, 10.0)];
        assert_eq!(hit_test(&items, 0.0, 0.0), Some(0));
        assert_eq!(hit_test(&items, 10.0, 5.0), None);
        assert_eq!(hit_test(&items, 5.0, 10.0), None);
        assert_eq!(hit_test(&[], 0.0, 0.0), None);
    }
}
