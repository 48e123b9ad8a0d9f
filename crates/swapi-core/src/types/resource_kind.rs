//! Resource kinds and their reference tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// One of the six resource kinds served by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Films,
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
}

/// How many records a reference field points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// A single URL (`homeworld`).
    One,
    /// An ordered list of URLs (`characters`).
    Many,
}

/// A reference field of some kind: its name, cardinality and target kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub cardinality: Cardinality,
    pub target: ResourceKind,
}

const fn one(field: &'static str, target: ResourceKind) -> Reference {
    Reference {
        field,
        cardinality: Cardinality::One,
        target,
    }
}

const fn many(field: &'static str, target: ResourceKind) -> Reference {
    Reference {
        field,
        cardinality: Cardinality::Many,
        target,
    }
}

use ResourceKind::*;

const FILM_REFS: &[Reference] = &[
    many("characters", People),
    many("planets", Planets),
    many("species", Species),
    many("starships", Starships),
    many("vehicles", Vehicles),
];

const PERSON_REFS: &[Reference] = &[
    one("homeworld", Planets),
    many("films", Films),
    many("species", Species),
    many("starships", Starships),
    many("vehicles", Vehicles),
];

const PLANET_REFS: &[Reference] = &[many("residents", People), many("films", Films)];

const SPECIES_REFS: &[Reference] = &[
    one("homeworld", Planets),
    many("people", People),
    many("films", Films),
];

const STARSHIP_REFS: &[Reference] = &[many("films", Films), many("pilots", People)];

const VEHICLE_REFS: &[Reference] = &[many("films", Films), many("pilots", People)];

impl ResourceKind {
    /// All kinds, in the order the API lists them.
    pub const ALL: [ResourceKind; 6] = [Films, People, Planets, Species, Starships, Vehicles];

    /// Returns the path segment of this kind below the API root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Films => "films",
            People => "people",
            Planets => "planets",
            Species => "species",
            Starships => "starships",
            Vehicles => "vehicles",
        }
    }

    /// Returns every reference field of this kind.
    pub fn references(&self) -> &'static [Reference] {
        match self {
            Films => FILM_REFS,
            People => PERSON_REFS,
            Planets => PLANET_REFS,
            Species => SPECIES_REFS,
            Starships => STARSHIP_REFS,
            Vehicles => VEHICLE_REFS,
        }
    }

    /// Look up a reference field by name.
    pub fn reference(&self, field: &str) -> Option<Reference> {
        self.references().iter().find(|r| r.field == field).copied()
    }

    /// Returns the field used as a display label (`title` for films, `name` otherwise).
    pub fn label_field(&self) -> &'static str {
        match self {
            Films => "title",
            _ => "name",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                InvalidInputError::Kind {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
