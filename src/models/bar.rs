//! Bar analytical model

use super::cdc::Cdc;
use super::double_option;
use super::foo::Foo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub id: String,
    pub foo_id: String,
    pub value: f64,
    pub label: Option<String>,
    pub notes: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bar joined with its parent foo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarWithFoo {
    #[serde(flatten)]
    pub bar: Bar,
    pub foo: Foo,
}

/// A bar row carrying CDC metadata columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarWithCdc {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(flatten)]
    pub cdc: Cdc,
}

/// Fields accepted when creating a bar (generated fields omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBar {
    pub foo_id: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

impl CreateBar {
    /// Materialize into a stored bar. `is_enabled` defaults to true.
    pub fn into_bar(self, id: impl Into<String>, now: DateTime<Utc>) -> Bar {
        Bar {
            id: id.into(),
            foo_id: self.foo_id,
            value: self.value,
            label: self.label,
            notes: self.notes,
            is_enabled: self.is_enabled.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; every field but `id` is optional. Nullable fields use
/// `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBar {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UpdateBar {
    /// Apply the set fields onto `bar`. Returns false (and leaves `bar`
    /// untouched) when the ids differ.
    pub fn apply_to(&self, bar: &mut Bar) -> bool {
        if self.id != bar.id {
            return false;
        }
        if let Some(foo_id) = &self.foo_id {
            bar.foo_id.clone_from(foo_id);
        }
        if let Some(value) = self.value {
            bar.value = value;
        }
        if let Some(label) = &self.label {
            bar.label.clone_from(label);
        }
        if let Some(notes) = &self.notes {
            bar.notes.clone_from(notes);
        }
        if let Some(is_enabled) = self.is_enabled {
            bar.is_enabled = is_enabled;
        }
        if let Some(updated_at) = self.updated_at {
            bar.updated_at = updated_at;
        }
        true
    }
}
