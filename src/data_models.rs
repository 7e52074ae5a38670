use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    Pet,
    Expert,
    Service,
    Lost,
    People,
}

impl SearchResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchResultType::Pet => "pet",
            SearchResultType::Expert => "expert",
            SearchResultType::Service => "service",
            SearchResultType::Lost => "lost",
            SearchResultType::People => "people",
        }
    }
}

/// One searchable entity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SearchResultType,

    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    /// Only meaningful for experts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, kind: SearchResultType, title: impl Into<String>) -> Self {
        SearchResult {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: None,
            image: None,
            location: None,
            price: None,
            rating: None,
            distance: None,
            reward: None,
            available: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = Some(distance.into());
        self
    }

    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = Some(reward.into());
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// The fields a query is matched against, absent optionals skipped.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.subtitle.as_deref())
            .chain(self.location.as_deref())
    }
}

/// Type filter applied on top of the text query.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(into = "String", try_from = "String")]
pub enum FilterValue {
    #[default]
    All,
    Only(SearchResultType),
}

impl FilterValue {
    /// Filter chips shown by the search screen, in display order.
    pub const OPTIONS: [(FilterValue, &'static str); 5] = [
        (FilterValue::All, "All"),
        (FilterValue::Only(SearchResultType::People), "People"),
        (FilterValue::Only(SearchResultType::Lost), "Lost Pets"),
        (FilterValue::Only(SearchResultType::Expert), "Experts"),
        (FilterValue::Only(SearchResultType::Service), "Services"),
    ];

    pub fn admits(&self, kind: SearchResultType) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Only(only) => *only == kind,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterValue::All => "all",
            FilterValue::Only(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterValue {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterValue::All),
            "pet" => Ok(FilterValue::Only(SearchResultType::Pet)),
            "expert" => Ok(FilterValue::Only(SearchResultType::Expert)),
            "service" => Ok(FilterValue::Only(SearchResultType::Service)),
            "lost" => Ok(FilterValue::Only(SearchResultType::Lost)),
            "people" => Ok(FilterValue::Only(SearchResultType::People)),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for FilterValue {
    type Error = UnknownFilter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SearchResultType> for FilterValue {
    fn from(kind: SearchResultType) -> Self {
        FilterValue::Only(kind)
    }
}

#[test]
fn test_filter_round_trips_through_str() {
    for (filter, _) in FilterValue::OPTIONS {
        assert_eq!(filter.as_str().parse::<FilterValue>(), Ok(filter));
    }
    assert_eq!(
        "Pet".parse::<FilterValue>(),
        Ok(FilterValue::Only(SearchResultType::Pet))
    );
    assert!("cats".parse::<FilterValue>().is_err());
}

#[test]
fn test_filter_all_admits_every_type() {
    for kind in [
        SearchResultType::Pet,
        SearchResultType::Expert,
        SearchResultType::Service,
        SearchResultType::Lost,
        SearchResultType::People,
    ] {
        assert!(FilterValue::All.admits(kind));
        assert!(FilterValue::Only(kind).admits(kind));
    }
    assert!(!FilterValue::Only(SearchResultType::Lost).admits(SearchResultType::Expert));
}
