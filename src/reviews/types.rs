use serde::{Deserialize, Serialize};

/// One user review as stored in the combined output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub city: String,
    pub organization: String,

    /// Missing authors are kept as `null`
    pub author: Option<String>,

    /// `YYYY-MM-DD`, or `"Unknown"`
    pub date: String,

    /// Numeric string such as `"4"` or `"4.5"`; empty when not found
    pub rating: String,

    pub content: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Fields of a review card before place context is attached
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCard {
    pub author: Option<String>,
    pub date: String,
    pub rating: String,
    pub content: String,
}

/// Place-level fields copied into every review of that place
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewContext {
    pub city: String,
    pub organization: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ReviewCard {
    #[must_use]
    pub fn into_review(self, context: &ReviewContext) -> Review {
        Review {
            city: context.city.clone(),
            organization: context.organization.clone(),
            author: self.author,
            date: self.date,
            rating: self.rating,
            content: self.content,
            lat: context.lat,
            lng: context.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_is_stable() {
        let review = Review {
            city: "Київ".to_string(),
            organization: "ЦНАП".to_string(),
            author: None,
            date: "2024-01-01".to_string(),
            rating: "5".to_string(),
            content: "Швидко і ввічливо".to_string(),
            lat: Some(50.45),
            lng: None,
        };
        let value = serde_json::to_value(&review).expect("serialize");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["author", "city", "content", "date", "lat", "lng", "organization", "rating"]
        );
        assert!(value["author"].is_null());
        assert!(value["lng"].is_null());
    }
}
