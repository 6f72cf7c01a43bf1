//! Data models
//!
//! - [`crm`] - CRM object records returned by the resource domains
//! - [`foo`], [`bar`] - analytical models shared with downstream pipelines
//! - [`cdc`] - change-data-capture metadata merged onto analytical rows

pub mod bar;
pub mod cdc;
pub mod crm;
pub mod foo;

pub use bar::{Bar, BarWithCdc, BarWithFoo, CreateBar, UpdateBar};
pub use cdc::{Cdc, CdcOperation};
pub use crm::{
    Association, AssociationPage, Companies, Company, CompanyResponse, Contact, ContactResponse,
    Contacts, CrmObject, Deal, DealResponse, Deals, PropertyHistory,
};
pub use foo::{CreateFoo, Foo, FooStatus, UpdateFoo};

use serde::{Deserialize, Deserializer};

/// Deserialize a field where "absent" and "explicit null" mean different
/// things: absent stays `None` (via `#[serde(default)]`), `null` becomes
/// `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
