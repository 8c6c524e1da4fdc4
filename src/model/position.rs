//! Crosshair position in absolute screen pixels.

/// Logical center of the crosshair. Off-screen and negative values are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of a `width` x `height` screen.
    pub fn center_of(width: i32, height: i32) -> Self {
        Self::new(width / 2, height / 2)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// `self - origin`, component-wise.
    pub fn delta_from(self, origin: Position) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }
}

/// One arrow-key step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

impl Nudge {
    /// Screen-space delta for a step of `step` pixels.
    pub fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Nudge::Up => (0, -step),
            Nudge::Down => (0, step),
            Nudge::Left => (-step, 0),
            Nudge::Right => (step, 0),
        }
    }
}

/// Parse a coordinate typed into a position field.
///
/// Integers and decimals are accepted; decimals truncate toward zero.
/// Empty, non-numeric, non-finite or out-of-range text yields `None`.
pub fn parse_coordinate(text: &str) -> Option<i32> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(v) = t.parse::<i32>() {
        return Some(v);
    }
    let v = t.parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    let truncated = v.trunc();
    if truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return None;
    }
    Some(truncated as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_decimals() {
        assert_eq!(parse_coordinate("960"), Some(960));
        assert_eq!(parse_coordinate(" -12 "), Some(-12));
        assert_eq!(parse_coordinate("540.9"), Some(540));
        assert_eq!(parse_coordinate("-3.7"), Some(-3));
        assert_eq!(parse_coordinate("1e3"), Some(1000));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("   "), None);
        assert_eq!(parse_coordinate("abc"), None);
        assert_eq!(parse_coordinate("12px"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
        assert_eq!(parse_coordinate("1e20"), None);
    }

    #[test]
    fn nudges_are_opposite_pairs() {
        let p = Position::new(10, 10);
        let (dx, dy) = Nudge::Right.delta(1);
        let (bx, by) = Nudge::Left.delta(1);
        assert_eq!(p.offset(dx, dy).offset(bx, by), p);
        assert_eq!(Nudge::Up.delta(1), (0, -1));
    }

    #[test]
    fn center_of_screen() {
        assert_eq!(Position::center_of(1920, 1080), Position::new(960, 540));
    }
}
