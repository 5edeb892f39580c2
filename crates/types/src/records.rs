//! Pass-through DTOs for the clinical record types the backend serves.
//!
//! The backend owns the field set of every record; the client treats them as
//! pass-through data with no derived invariants beyond display formatting.
//! Each DTO names the handful of fields the dashboard actually renders and
//! keeps everything else in a flattened `extra` map, so a backend that grows
//! new fields never breaks deserialisation and never loses data on the way
//! back out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Binds a record type to its REST resource path under `/api/`.
///
/// The typeahead endpoint for a resource is `<RESOURCE>-search`.
pub trait ResourceRecord {
    /// The path segment of the resource collection, e.g. `"registrations"`.
    const RESOURCE: &'static str;
}

/// A patient visit registration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Registration {
    pub id: u64,
    pub registration_number: String,
    pub mrn: String,
    pub patient_name: String,
    #[serde(default)]
    pub service_unit: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for Registration {
    const RESOURCE: &'static str = "registrations";
}

/// One entry on a service unit's queue board.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: u64,
    pub queue_number: String,
    #[serde(default)]
    pub service_unit: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub called_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for QueueEntry {
    const RESOURCE: &'static str = "queues";
}

/// An insurance-eligibility document (SEP) issued for a visit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sep {
    pub id: u64,
    pub sep_number: String,
    #[serde(default)]
    pub bpjs_card_number: Option<String>,
    #[serde(default)]
    pub mrn: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub service_unit: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for Sep {
    const RESOURCE: &'static str = "seps";
}

/// A radiology examination order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadiologyOrder {
    pub id: u64,
    pub order_number: String,
    pub mrn: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub examination: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ordered_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for RadiologyOrder {
    const RESOURCE: &'static str = "radiology-orders";
}

/// A structured nursing/clinical progress note (CPPT).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CpptEntry {
    pub id: u64,
    pub mrn: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub subjective: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for CpptEntry {
    const RESOURCE: &'static str = "cppt";
}

/// The patient fields a lookup result needs to populate a form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: u64,
    pub mrn: String,
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub bpjs_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord for PatientSummary {
    const RESOURCE: &'static str = "patients";
}
