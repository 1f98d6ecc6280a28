//! Onboarding answer vocabularies
//!
//! Each multiple-choice question is a closed enum with a stable wire key
//! (what the backend stores) and a display label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Macro to generate closed choice enums with keys and labels
macro_rules! define_choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every option, in display order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable key stored by the backend
            pub const fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            /// Human-readable label
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Parse from a key or a label (case-insensitive)
            pub fn parse(s: &str) -> Option<Self> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == wanted || v.label().to_lowercase() == wanted)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

define_choice!(
    /// Gender, optional on the profile step
    Gender {
        Female => ("female", "Female"),
        Male => ("male", "Male"),
        NonBinary => ("non_binary", "Non-binary"),
        PreferNotToSay => ("prefer_not_to_say", "Prefer not to say"),
    }
);

define_choice!(
    /// Occasions the user eats out for
    Occasion {
        DateNight => ("date_night", "Date night"),
        FamilyMeal => ("family_meal", "Family meal"),
        FriendsHangout => ("friends_hangout", "Hanging out with friends"),
        BusinessMeal => ("business_meal", "Business meal"),
        SoloMeal => ("solo_meal", "Eating solo"),
        Celebration => ("celebration", "Celebration"),
        QuickBite => ("quick_bite", "Quick bite"),
        Brunch => ("brunch", "Brunch"),
    }
);

define_choice!(
    /// How often the user eats out
    Frequency {
        Rarely => ("rarely", "Rarely"),
        Monthly => ("monthly", "A few times a month"),
        Weekly => ("weekly", "Once a week"),
        SeveralTimesAWeek => ("several_times_a_week", "Several times a week"),
        Daily => ("daily", "Almost every day"),
    }
);

define_choice!(
    /// Kinds of places the user likes
    PlaceType {
        Casual => ("casual", "Casual restaurants"),
        FineDining => ("fine_dining", "Fine dining"),
        Bar => ("bar", "Bars and pubs"),
        Cafe => ("cafe", "Cafés and bakeries"),
        FastFood => ("fast_food", "Fast food"),
        FoodTruck => ("food_truck", "Food trucks and street food"),
    }
);

define_choice!(
    /// What drives the user's choice of restaurant
    DecisionStyle {
        Reviews => ("reviews", "Reading reviews"),
        Friends => ("friends", "Friends' recommendations"),
        Photos => ("photos", "Photos of the food"),
        Price => ("price", "Price"),
        Proximity => ("proximity", "Being close by"),
        Novelty => ("novelty", "Trying something new"),
    }
);

define_choice!(
    /// Specific dietary restrictions
    DietaryRestriction {
        Vegetarian => ("vegetarian", "Vegetarian"),
        Vegan => ("vegan", "Vegan"),
        GlutenFree => ("gluten_free", "Gluten-free"),
        LactoseFree => ("lactose_free", "Lactose-free"),
        Halal => ("halal", "Halal"),
        Kosher => ("kosher", "Kosher"),
        NutAllergy => ("nut_allergy", "Nut allergy"),
        SeafoodAllergy => ("seafood_allergy", "Seafood allergy"),
    }
);

/// Wire key for the "no restrictions" answer
pub const NO_RESTRICTIONS_KEY: &str = "none";

/// The dietary restrictions answer
///
/// "No restrictions" and specific restrictions are mutually exclusive; the
/// variants make a mixed state impossible to build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum DietarySelection {
    /// Nothing picked yet
    #[default]
    Unanswered,
    /// The user has no restrictions
    NoRestrictions,
    /// One or more specific restrictions (never empty)
    Specific(BTreeSet<DietaryRestriction>),
}

impl DietarySelection {
    /// Toggle the "no restrictions" answer; selecting it drops any specifics
    pub fn toggle_none(&mut self) {
        *self = match self {
            Self::NoRestrictions => Self::Unanswered,
            _ => Self::NoRestrictions,
        };
    }

    /// Toggle a specific restriction; selecting one drops "no restrictions"
    pub fn toggle(&mut self, restriction: DietaryRestriction) {
        let mut items = match std::mem::take(self) {
            Self::Specific(items) => items,
            Self::Unanswered | Self::NoRestrictions => BTreeSet::new(),
        };

        if !items.remove(&restriction) {
            items.insert(restriction);
        }

        *self = if items.is_empty() {
            Self::Unanswered
        } else {
            Self::Specific(items)
        };
    }

    /// Whether any answer has been given (including "no restrictions")
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    /// Whether "no restrictions" is the current answer
    pub fn is_none_selected(&self) -> bool {
        matches!(self, Self::NoRestrictions)
    }

    /// Whether a specific restriction is selected
    pub fn contains(&self, restriction: DietaryRestriction) -> bool {
        match self {
            Self::Specific(items) => items.contains(&restriction),
            _ => false,
        }
    }

    /// Keys as stored by the backend, using the "none" sentinel
    pub fn to_keys(&self) -> Vec<String> {
        match self {
            Self::Unanswered => Vec::new(),
            Self::NoRestrictions => vec![NO_RESTRICTIONS_KEY.to_string()],
            Self::Specific(items) => items.iter().map(|r| r.key().to_string()).collect(),
        }
    }
}

impl fmt::Display for DietarySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unanswered => write!(f, "(not answered)"),
            Self::NoRestrictions => write!(f, "No restrictions"),
            Self::Specific(items) => {
                let labels: Vec<_> = items.iter().map(|r| r.label()).collect();
                write!(f, "{}", labels.join(", "))
            }
        }
    }
}

/// Render a set of choices as their keys
pub fn keys<T, F>(items: &BTreeSet<T>, key: F) -> Vec<String>
where
    F: Fn(&T) -> &'static str,
{
    items.iter().map(|item| key(item).to_string()).collect()
}
