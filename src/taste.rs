//! The twelve taste attributes scored for every distillery.

use std::fmt;

/// Number of taste attributes carried by every record.
pub const TASTE_ATTRIBUTE_COUNT: usize = 12;

/// Lowest score a taste attribute is expected to carry.
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a taste attribute is expected to carry.
pub const MAX_SCORE: f64 = 4.0;

/// One flavour-intensity dimension of a tasting profile.
///
/// The declaration order matches the column order of the input file, so
/// [`TasteAttribute::index`] doubles as the offset inside the taste range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TasteAttribute {
    Body,
    Sweetness,
    Smoky,
    Medicinal,
    Tobacco,
    Honey,
    Spicy,
    Winey,
    Nutty,
    Malty,
    Fruity,
    Floral,
}

impl TasteAttribute {
    /// All attributes in column order.
    pub const ALL: [TasteAttribute; TASTE_ATTRIBUTE_COUNT] = [
        TasteAttribute::Body,
        TasteAttribute::Sweetness,
        TasteAttribute::Smoky,
        TasteAttribute::Medicinal,
        TasteAttribute::Tobacco,
        TasteAttribute::Honey,
        TasteAttribute::Spicy,
        TasteAttribute::Winey,
        TasteAttribute::Nutty,
        TasteAttribute::Malty,
        TasteAttribute::Fruity,
        TasteAttribute::Floral,
    ];

    /// Attributes averaged into the smoke point.
    pub const SMOKE: [TasteAttribute; 3] = [
        TasteAttribute::Body,
        TasteAttribute::Sweetness,
        TasteAttribute::Smoky,
    ];

    /// Column header used by the input file.
    pub fn name(self) -> &'static str {
        match self {
            TasteAttribute::Body => "Body",
            TasteAttribute::Sweetness => "Sweetness",
            TasteAttribute::Smoky => "Smoky",
            TasteAttribute::Medicinal => "Medicinal",
            TasteAttribute::Tobacco => "Tobacco",
            TasteAttribute::Honey => "Honey",
            TasteAttribute::Spicy => "Spicy",
            TasteAttribute::Winey => "Winey",
            TasteAttribute::Nutty => "Nutty",
            TasteAttribute::Malty => "Malty",
            TasteAttribute::Fruity => "Fruity",
            TasteAttribute::Floral => "Floral",
        }
    }

    /// Offset of the attribute inside the taste range.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the attribute whose column header equals `name`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name() == name)
    }

    /// Attribute names in column order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|attr| attr.name().to_owned()).collect()
    }
}

impl fmt::Display for TasteAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scores of a single record, one optional value per attribute.
///
/// A cell that was empty or not numeric in the input is stored as `None` and
/// is skipped by every aggregate computed over the scores.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TasteScores([Option<f64>; TASTE_ATTRIBUTE_COUNT]);

impl TasteScores {
    /// Creates scores from raw optional cells in column order.
    pub fn new(scores: [Option<f64>; TASTE_ATTRIBUTE_COUNT]) -> Self {
        Self(scores)
    }

    /// Creates scores where every cell is numeric.
    pub fn from_values(values: [f64; TASTE_ATTRIBUTE_COUNT]) -> Self {
        Self(values.map(Some))
    }

    /// Returns the score of `attribute`, if the cell was numeric.
    pub fn get(&self, attribute: TasteAttribute) -> Option<f64> {
        self.0[attribute.index()]
    }

    /// Iterates over every attribute with its optional score.
    pub fn iter(&self) -> impl Iterator<Item = (TasteAttribute, Option<f64>)> + '_ {
        TasteAttribute::ALL
            .iter()
            .copied()
            .zip(self.0.iter().copied())
    }

    /// Iterates over the numeric scores only.
    pub fn numeric(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(|score| *score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_order_matches_column_order() {
        let names = TasteAttribute::names();
        assert_eq!(names.first().map(String::as_str), Some("Body"));
        assert_eq!(names.last().map(String::as_str), Some("Floral"));
        for (index, attribute) in TasteAttribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), index);
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(TasteAttribute::from_name("Smoky"), Some(TasteAttribute::Smoky));
        assert_eq!(TasteAttribute::from_name("smoky"), None);
    }

    #[test]
    fn numeric_skips_missing_cells() {
        let mut cells = [Some(1.0); TASTE_ATTRIBUTE_COUNT];
        cells[3] = None;
        let scores = TasteScores::new(cells);
        assert_eq!(scores.numeric().count(), 11);
        assert_eq!(scores.get(TasteAttribute::Medicinal), None);
    }
}
