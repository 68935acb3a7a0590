use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: String,
    pub location: String,
    pub price: f64,
    /// Any other attributes of the listing, echoed back untouched.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Offering {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: category.into(),
            location: location.into(),
            price,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}
