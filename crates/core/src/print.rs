//! Printable slip formatting.
//!
//! The dashboard prints queue slips and SEP forms by handing a complete
//! HTML document to a print window. Formatting is kept as pure functions
//! from record to HTML string: no window handling, no side effects, so the
//! output can be snapshot-tested. All record-sourced text is escaped.

use chrono::{DateTime, Utc};
use html_escape::encode_text;
use simrs_types::{Registration, Sep};

fn field(value: Option<&str>) -> String {
    match value {
        Some(text) => encode_text(text).into_owned(),
        None => "-".to_owned(),
    }
}

fn timestamp(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.format("%d-%m-%Y %H:%M").to_string(),
        None => "-".to_owned(),
    }
}

/// Renders a registration queue slip as a standalone HTML document.
pub fn queue_slip_html(registration: &Registration) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Queue Slip</title></head>\n\
         <body>\n\
         <h1>{number}</h1>\n\
         <p class=\"unit\">{unit}</p>\n\
         <table>\n\
         <tr><td>MRN</td><td>{mrn}</td></tr>\n\
         <tr><td>Name</td><td>{name}</td></tr>\n\
         <tr><td>Payment</td><td>{payment}</td></tr>\n\
         <tr><td>Registered</td><td>{registered}</td></tr>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        number = encode_text(&registration.registration_number),
        unit = field(registration.service_unit.as_deref()),
        mrn = encode_text(&registration.mrn),
        name = encode_text(&registration.patient_name),
        payment = field(registration.payment_type.as_deref()),
        registered = timestamp(registration.registered_at.as_ref()),
    )
}

/// Renders a SEP form as a standalone HTML document.
pub fn sep_form_html(sep: &Sep) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Surat Eligibilitas Peserta</title></head>\n\
         <body>\n\
         <h1>SEP {number}</h1>\n\
         <table>\n\
         <tr><td>BPJS Card</td><td>{card}</td></tr>\n\
         <tr><td>MRN</td><td>{mrn}</td></tr>\n\
         <tr><td>Name</td><td>{name}</td></tr>\n\
         <tr><td>Service Unit</td><td>{unit}</td></tr>\n\
         <tr><td>Diagnosis</td><td>{diagnosis}</td></tr>\n\
         <tr><td>Issued</td><td>{issued}</td></tr>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        number = encode_text(&sep.sep_number),
        card = field(sep.bpjs_card_number.as_deref()),
        mrn = field(sep.mrn.as_deref()),
        name = field(sep.patient_name.as_deref()),
        unit = field(sep.service_unit.as_deref()),
        diagnosis = field(sep.diagnosis.as_deref()),
        issued = timestamp(sep.issued_at.as_ref()),
    )
}
