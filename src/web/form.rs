//! Submission form fields and their conversion into a record

use crate::error::{Error, Result};
use crate::types::SubmissionRecord;
use serde::{Deserialize, Serialize};

/// Native input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Floating point number
    Number,
}

/// Static description of one form input
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Form parameter and document key
    pub name: &'static str,
    /// Visible label
    pub label: &'static str,
    /// Help text shown under the input
    pub help: Option<&'static str>,
    /// Input type
    pub kind: FieldKind,
}

/// The nine inputs, in document order
pub const FIELDS: [FieldSpec; 9] = [
    FieldSpec {
        name: "name",
        label: "name",
        help: Some("Name of the sample, e.g. TiO2 rutile"),
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "particle_size",
        label: "particle size / nm",
        help: Some(
            "Feret diameter of the primary sample particle, measured with Transmission Electron Microscopy in nm",
        ),
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "composition",
        label: "composition",
        help: Some("composition of the primary sample particle, e.g. ZnO"),
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "energy_density",
        label: "energy density / J/mL",
        help: Some("delivered sonication energy per sample volume, measured using calorimetry."),
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "z_av",
        label: "z average / nm",
        help: Some("Obtained Z-average, measured using Dynamic Light Scattering."),
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "pdi",
        label: "PDI",
        help: Some("Polydispersity Index, measured using Dynamic Light Scattering."),
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "doi",
        label: "DOI of reference",
        help: None,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "name_affiliation",
        label: "submitter name and affiliation",
        help: Some(
            "Please include your name and affiliation if you want it to appear in the database.",
        ),
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "comments",
        label: "comments",
        help: Some("Any additional information you want to add"),
        kind: FieldKind::Text,
    },
];

/// Raw form values exactly as posted
///
/// Missing parameters deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    /// Sample name
    pub name: String,
    /// Particle size text
    pub particle_size: String,
    /// Composition
    pub composition: String,
    /// Energy density as typed
    pub energy_density: String,
    /// Z-average as typed
    pub z_av: String,
    /// PDI as typed
    pub pdi: String,
    /// DOI
    pub doi: String,
    /// Submitter attribution
    pub name_affiliation: String,
    /// Comments
    pub comments: String,
}

impl SubmissionForm {
    /// Raw value of a field by name
    pub fn value(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "particle_size" => &self.particle_size,
            "composition" => &self.composition,
            "energy_density" => &self.energy_density,
            "z_av" => &self.z_av,
            "pdi" => &self.pdi,
            "doi" => &self.doi,
            "name_affiliation" => &self.name_affiliation,
            "comments" => &self.comments,
            _ => "",
        }
    }

    /// Convert into a record
    ///
    /// Only the number inputs are checked, and only for being numbers.
    /// Text is taken verbatim; empty numbers become `0.0`.
    pub fn to_record(&self) -> Result<SubmissionRecord> {
        Ok(SubmissionRecord {
            name: self.name.clone(),
            particle_size: self.particle_size.clone(),
            composition: self.composition.clone(),
            energy_density: parse_number("energy_density", &self.energy_density)?,
            z_av: parse_number("z_av", &self.z_av)?,
            pdi: parse_number("pdi", &self.pdi)?,
            doi: self.doi.clone(),
            name_affiliation: self.name_affiliation.clone(),
            comments: self.comments.clone(),
        })
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = raw.parse().map_err(|_| Error::InvalidField {
        field,
        reason: format!("'{raw}' is not a number"),
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidField {
            field,
            reason: format!("'{raw}' is not a finite number"),
        });
    }
    Ok(value)
}
