/// Top edge of the active band, as a fraction of the viewport height.
pub const BAND_TOP: f64 = 0.2;
/// Bottom edge of the active band, as a fraction of the viewport height.
pub const BAND_BOTTOM: f64 = 0.8;

/// Observer root margin that shrinks the viewport to the active band: the
/// heading counts as visible once its top passes 80% of the viewport and until
/// its bottom passes 20%.
pub fn band_root_margin() -> String {
    format!(
        "-{}% 0px -{}% 0px",
        (BAND_TOP * 100.0).round(),
        ((1.0 - BAND_BOTTOM) * 100.0).round()
    )
}

/// Where the watched element sits relative to the active band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Above,
    Inside,
    #[default]
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Scrolled down into the band.
    Enter,
    /// Scrolled down past the band.
    Leave,
    /// Scrolled back up into the band.
    EnterBack,
    /// Scrolled back up past the band's start.
    LeaveBack,
}

/// Turns one observer report into the new side and, when the side changed in a
/// way the choreography cares about, the matching visibility event.
pub fn classify_visibility(
    previous: Side,
    is_intersecting: bool,
    bottom: f64,
    viewport_height: f64,
) -> (Side, Option<Visibility>) {
    let current = if is_intersecting {
        Side::Inside
    } else if bottom <= viewport_height * BAND_TOP {
        Side::Above
    } else {
        Side::Below
    };

    let event = match (previous, current) {
        (Side::Below, Side::Inside) => Some(Visibility::Enter),
        (Side::Above, Side::Inside) => Some(Visibility::EnterBack),
        (Side::Inside, Side::Above) | (Side::Below, Side::Above) => Some(Visibility::Leave),
        (Side::Inside, Side::Below) | (Side::Above, Side::Below) => Some(Visibility::LeaveBack),
        _ => None,
    };
    (current, event)
}
