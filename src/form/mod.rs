pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::consts::{MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_WEIGHT_KG};

pub use validator::{Bounds, Rejection};

/// One of the three numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Height,
    Weight,
    Age,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Height, Field::Weight, Field::Age];

    /// Wire name, as sent to the service.
    pub fn name(self) -> &'static str {
        match self {
            Field::Height => "altura",
            Field::Weight => "peso",
            Field::Age => "edad",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Height => "cm",
            Field::Weight => "kg",
            Field::Age => "años",
        }
    }

    pub fn bounds(self) -> Bounds {
        match self {
            Field::Height => Bounds::up_to(MAX_HEIGHT_CM),
            Field::Weight => Bounds::up_to(MAX_WEIGHT_KG),
            Field::Age => Bounds::up_to(MAX_AGE_YEARS),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "altura" | "height" => Ok(Field::Height),
            "peso" | "weight" => Ok(Field::Weight),
            "edad" | "age" => Ok(Field::Age),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Masculino,
    Femenino,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Masculino => "masculino",
            Sex::Femenino => "femenino",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "masculino" | "m" => Ok(Sex::Masculino),
            "femenino" | "f" => Ok(Sex::Femenino),
            other => Err(format!("unknown sex: {other} (use masculino or femenino)")),
        }
    }
}

/// Immutable snapshot sent to the risk service.
///
/// Field order matters: it is the order of the keys in the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRequest {
    #[serde(rename = "peso")]
    pub weight: String,
    #[serde(rename = "altura")]
    pub height: String,
    #[serde(rename = "edad")]
    pub age: String,
    #[serde(rename = "genero")]
    pub sex: Sex,
}

/// The four inputs, as last accepted.
///
/// Every accepted change that alters a value bumps `revision`, so watchers can
/// tell revisions apart without comparing fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    height: String,
    weight: String,
    age: String,
    sex: Option<Sex>,
    revision: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a raw value. `Ok(true)` if the stored value changed.
    /// A rejected value leaves the whole state untouched.
    pub fn update(&mut self, field: Field, raw: &str) -> Result<bool, Rejection> {
        validator::check(raw, field.bounds())?;
        let slot = self.slot_mut(field);
        if slot.as_str() == raw {
            return Ok(false);
        }
        *slot = raw.to_string();
        self.revision += 1;
        Ok(true)
    }

    /// Set or unset the sex. No bounds apply. Returns whether it changed.
    pub fn update_sex(&mut self, sex: Option<Sex>) -> bool {
        if self.sex == sex {
            return false;
        }
        self.sex = sex;
        self.revision += 1;
        true
    }

    /// Empty every input as a single new revision.
    pub fn clear(&mut self) {
        let revision = self.revision + 1;
        *self = Self {
            revision,
            ..Self::default()
        };
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Height => &self.height,
            Field::Weight => &self.weight,
            Field::Age => &self.age,
        }
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_complete(&self) -> bool {
        !self.height.is_empty()
            && !self.weight.is_empty()
            && !self.age.is_empty()
            && self.sex.is_some()
    }

    /// The request for this revision, or `None` while incomplete.
    pub fn snapshot(&self) -> Option<AssessmentRequest> {
        if !self.is_complete() {
            return None;
        }
        Some(AssessmentRequest {
            weight: self.weight.clone(),
            height: self.height.clone(),
            age: self.age.clone(),
            sex: self.sex?,
        })
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
            Field::Age => &mut self.age,
        }
    }
}
