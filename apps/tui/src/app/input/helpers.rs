/// Moves `index` by `delta` rows, clamped to `0..len`.
pub const fn jump(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let moved = index.saturating_add_signed(delta);
    if moved >= len {
        len - 1
    } else {
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_clamps_to_range() {
        assert_eq!(jump(2, -5, 10), 0);
        assert_eq!(jump(7, 5, 10), 9);
        assert_eq!(jump(4, 1, 10), 5);
        assert_eq!(jump(3, 5, 0), 0);
    }
}
