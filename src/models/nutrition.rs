//! Nutrient vector shared by entries, rows and totals

use serde::{Deserialize, Serialize};

/// The four tracked nutrient values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub energy: f64,  // kcal
    pub protein: f64, // grams
    pub fat: f64,     // grams
    pub carbs: f64,   // grams
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Multiply every value by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            energy: self.energy * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
        }
    }

    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            energy: self.energy + other.energy,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }

    /// True when every field is within `tolerance` of `other`
    pub fn approx_eq(&self, other: &Nutrition, tolerance: f64) -> bool {
        (self.energy - other.energy).abs() <= tolerance
            && (self.protein - other.protein).abs() <= tolerance
            && (self.fat - other.fat).abs() <= tolerance
            && (self.carbs - other.carbs).abs() <= tolerance
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, factor: f64) -> Nutrition {
        self.scale(factor)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}
