//! Acceptance filters for discovered places

use std::collections::HashSet;

use super::types::AddressComponent;

const REGION_TYPE: &str = "administrative_area_level_1";
const CITY_TYPE: &str = "locality";

/// Rejects places whose name contains an excluded fragment.
///
/// Runs before the details lookup, so it only sees the search-result name.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The first excluded fragment found in `name`, if any.
    #[must_use]
    pub fn matching_keyword(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .find(|k| name.contains(k.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.matching_keyword(name).is_some()
    }
}

/// Accepts places inside the target oblast or the target city.
///
/// The city is its own first-level division, so it may show up either as a
/// `locality` or as `administrative_area_level_1`.
#[derive(Debug, Clone)]
pub struct RegionFilter {
    regions: HashSet<String>,
    cities: HashSet<String>,
}

impl RegionFilter {
    pub fn new<I, J, S, T>(regions: I, cities: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn in_region(&self, components: &[AddressComponent]) -> bool {
        components
            .iter()
            .filter(|c| c.has_type(REGION_TYPE))
            .any(|c| Self::named(c, &self.regions))
    }

    #[must_use]
    pub fn in_city(&self, components: &[AddressComponent]) -> bool {
        components
            .iter()
            .filter(|c| c.has_type(CITY_TYPE) || c.has_type(REGION_TYPE))
            .any(|c| Self::named(c, &self.cities))
    }

    #[must_use]
    pub fn accepts(&self, components: &[AddressComponent]) -> bool {
        self.in_region(components) || self.in_city(components)
    }

    fn named(component: &AddressComponent, names: &HashSet<String>) -> bool {
        names.contains(&component.long_name) || names.contains(&component.short_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, types: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: name.to_string(),
            short_name: name.to_string(),
            types: types.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_keyword_filter_is_case_insensitive() {
        let filter = KeywordFilter::new(["юридичн", "Visa"]);
        assert!(filter.is_excluded("Приватна ЮРИДИЧНА фірма"));
        assert_eq!(filter.matching_keyword("VISA centre"), Some("visa"));
        assert!(!filter.is_excluded("Київська міська рада"));
    }

    #[test]
    fn test_region_filter() {
        let filter = RegionFilter::new(["Kyiv Oblast"], ["Kyiv", "Київ"]);

        let oblast = [
            component("Brovary", &["locality", "political"]),
            component("Kyiv Oblast", &["administrative_area_level_1", "political"]),
        ];
        assert!(filter.accepts(&oblast));

        let city = [component("Київ", &["locality", "political"])];
        assert!(filter.in_city(&city));
        assert!(filter.accepts(&city));

        let city_as_region = [component("Kyiv", &["administrative_area_level_1"])];
        assert!(filter.accepts(&city_as_region));

        // the right name under the wrong type does not count
        let wrong_type = [component("Kyiv Oblast", &["route"])];
        assert!(!filter.accepts(&wrong_type));

        let elsewhere = [
            component("Lviv", &["locality"]),
            component("Lviv Oblast", &["administrative_area_level_1"]),
        ];
        assert!(!filter.accepts(&elsewhere));
        assert!(!filter.accepts(&[]));
    }
}
