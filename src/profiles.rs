//! Hand-picked tasting profiles compared on the radial chart.

use crate::palette::{Rgb, BLUE, GREEN, ORANGE};
use crate::taste::TASTE_ATTRIBUTE_COUNT;

/// A fixed tasting profile shown in one polar subplot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturedProfile {
    pub name: &'static str,
    /// Scores in taste-attribute column order.
    pub scores: [u8; TASTE_ATTRIBUTE_COUNT],
    pub fill: Rgb,
    /// 1-indexed subplot column.
    pub column: usize,
}

/// Best rounded, best smoke and best mixture, in trace order.
pub const FEATURED_PROFILES: [FeaturedProfile; 3] = [
    FeaturedProfile {
        name: "Aberlour",
        scores: [3, 3, 1, 0, 0, 4, 3, 2, 2, 3, 3, 2],
        fill: ORANGE,
        column: 3,
    },
    FeaturedProfile {
        name: "Laphroig",
        scores: [4, 2, 4, 4, 1, 0, 0, 1, 1, 1, 0, 0],
        fill: GREEN,
        column: 1,
    },
    FeaturedProfile {
        name: "Talisker",
        scores: [4, 2, 3, 3, 0, 1, 3, 0, 1, 2, 2, 0],
        fill: BLUE,
        column: 2,
    },
];

/// Number of polar subplots the profiles are spread over.
pub const PROFILE_COLUMNS: usize = 3;
