/// First visible row so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}
