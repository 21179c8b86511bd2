// Classification tables. Each table is scanned top to bottom and the first matching row wins.
use crate::model::{BadgeTier, Category, Gradient};

/// Badge for a carousel slide that passed the discount filter, keyed by rounded savings.
pub const BADGE_RULES: &[(f64, BadgeTier)] = &[
    (75.0, BadgeTier::MegaDeal),
    (50.0, BadgeTier::GreatDeal),
    (25.0, BadgeTier::GoodDeal),
];
pub const BADGE_DEFAULT: BadgeTier = BadgeTier::Deal;

/// Badge for slides produced by the unfiltered fallback query.
pub const RELAXED_BADGE_RULES: &[(f64, BadgeTier)] = &[(1.0, BadgeTier::OnSale)];
pub const RELAXED_BADGE_DEFAULT: BadgeTier = BadgeTier::Featured;

pub const SCORE_RULES: &[(f64, Category)] = &[
    (85.0, Category::CriticallyAcclaimed),
    (75.0, Category::HighlyRated),
    (60.0, Category::Recommended),
];

pub const RATING_TEXT_RULES: &[(&str, Category)] = &[
    ("Overwhelmingly", Category::OverwhelminglyPositive),
    ("Very", Category::VeryPositive),
    ("Mostly", Category::MostlyPositive),
];
pub const CATEGORY_DEFAULT: Category = Category::Action;

pub const GRADIENTS: [Gradient; 5] = [
    Gradient("linear-gradient(135deg, #ff6b6b, #4ecdc4, #45b7d1)"),
    Gradient("linear-gradient(135deg, #667eea, #764ba2, #f093fb)"),
    Gradient("linear-gradient(135deg, #ffecd2, #fcb69f, #ff8a80)"),
    Gradient("linear-gradient(135deg, #a8edea, #fed6e3, #d299c2)"),
    Gradient("linear-gradient(135deg, #ff9a9e, #fecfef, #fecfef)"),
];
pub const ERROR_GRADIENT: Gradient = Gradient("linear-gradient(135deg, #ff6b6b, #ff8787, #ff6b6b)");

/// First label whose threshold is `<= value`.
pub fn first_at_least<L: Copy>(rules: &[(f64, L)], value: f64) -> Option<L> {
    rules.iter().find(|(min, _)| value >= *min).map(|(_, label)| *label)
}

/// First label whose keyword occurs in `text`.
pub fn first_containing<L: Copy>(rules: &[(&str, L)], text: &str) -> Option<L> {
    rules.iter().find(|(needle, _)| text.contains(needle)).map(|(_, label)| *label)
}

pub fn badge_for(savings: i64) -> BadgeTier {
    first_at_least(BADGE_RULES, savings as f64).unwrap_or(BADGE_DEFAULT)
}

pub fn relaxed_badge_for(savings: i64) -> BadgeTier {
    first_at_least(RELAXED_BADGE_RULES, savings as f64).unwrap_or(RELAXED_BADGE_DEFAULT)
}

/// Critic score rules first, then rating text keywords, then the default.
pub fn category_for(score: Option<f64>, rating_text: Option<&str>) -> Category {
    score
        .and_then(|s| first_at_least(SCORE_RULES, s))
        .or_else(|| rating_text.and_then(|t| first_containing(RATING_TEXT_RULES, t)))
        .unwrap_or(CATEGORY_DEFAULT)
}

pub fn gradient_for(index: usize) -> Gradient {
    GRADIENTS[index % GRADIENTS.len()]
}
