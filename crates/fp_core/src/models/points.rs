//! Grand prix championship points table.
//!
//! Used by effects that reclassify a driver (`position_adjust`,
//! `undercut`) and must rescore the shifted position. Sprint points are
//! never rescored by a card, they arrive pre-computed on the result rows.

/// Grand prix points by finishing position, P1 first.
pub const GRAND_PRIX_POINTS: [f64; 10] =
    [25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0];

/// Points awarded for a grand prix finishing position (1-based).
/// Positions outside the table score zero.
pub fn grand_prix_points(position: u32) -> f64 {
    match position {
        1..=10 => GRAND_PRIX_POINTS[(position - 1) as usize],
        _ => 0.0,
    }
}
