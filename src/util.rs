use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centered inside `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 10, 6), Size::new(6, 2), Rect::new(2, 2, 6, 2))]
    #[case(Rect::new(5, 7, 20, 10), Size::new(20, 10), Rect::new(5, 7, 20, 10))]
    #[case(Rect::new(0, 1, 10, 3), Size::new(6, 3), Rect::new(2, 1, 6, 3))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }
}
