//! Typed records for each resource kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::ResourceKind;

use super::{Link, Links};

/// Binds a marker type to a resource kind and its typed record.
pub trait Kind: Send + Sync + 'static {
    /// The kind served by this endpoint.
    const KIND: ResourceKind;

    /// The typed form of one record of this kind.
    type Record: DeserializeOwned + Serialize + Send + Sync;
}

macro_rules! kind {
    ($(#[$meta:meta])* $marker:ident => $variant:ident, $record:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $marker;

        impl Kind for $marker {
            const KIND: ResourceKind = ResourceKind::$variant;
            type Record = $record;
        }
    };
}

kind!(
    /// The `films` endpoint.
    Films => Films, Film
);
kind!(
    /// The `people` endpoint.
    People => People, Person
);
kind!(
    /// The `planets` endpoint.
    Planets => Planets, Planet
);
kind!(
    /// The `species` endpoint.
    Species => Species, Specie
);
kind!(
    /// The `starships` endpoint.
    Starships => Starships, Starship
);
kind!(
    /// The `vehicles` endpoint.
    Vehicles => Vehicles, Vehicle
);

/// A film.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    #[serde(deserialize_with = "number_or_string")]
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: NaiveDate,
    pub characters: Links<Person>,
    pub planets: Links<Planet>,
    pub species: Links<Specie>,
    pub starships: Links<Starship>,
    pub vehicles: Links<Vehicle>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

/// Accepts `4` as well as `"4"`.
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"an episode number")),
    }
}

/// A character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
    pub gender: String,
    pub hair_color: String,
    pub height: String,
    pub mass: String,
    pub skin_color: String,
    pub homeworld: Link<Planet>,
    pub films: Links<Film>,
    pub species: Links<Specie>,
    pub starships: Links<Starship>,
    pub vehicles: Links<Vehicle>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

/// A planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub diameter: String,
    pub gravity: String,
    pub orbital_period: String,
    pub population: String,
    pub rotation_period: String,
    pub surface_water: String,
    pub terrain: String,
    pub residents: Links<Person>,
    pub films: Links<Film>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

/// A species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specie {
    pub name: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub classification: String,
    pub designation: String,
    pub eye_colors: String,
    pub hair_colors: String,
    pub skin_colors: String,
    pub language: String,
    /// Some species (droids) have no homeworld.
    pub homeworld: Option<Link<Planet>>,
    pub people: Links<Person>,
    pub films: Links<Film>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

/// A starship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub hyperdrive_rating: String,
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub starship_class: String,
    pub pilots: Links<Person>,
    pub films: Links<Film>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

/// A vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub vehicle_class: String,
    pub pilots: Links<Person>,
    pub films: Links<Film>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(name: &str, homeworld: serde_json::Value) -> serde_json::Value {
        json!({
            "name": name,
            "birth_year": "19BBY",
            "eye_color": "blue",
            "gender": "male",
            "hair_color": "blond",
            "height": "172",
            "mass": "77",
            "skin_color": "fair",
            "homeworld": homeworld,
            "films": ["https://swapi.dev/api/films/1/"],
            "species": [],
            "starships": [],
            "vehicles": [],
            "created": "2014-12-09T13:50:51.644000Z",
            "edited": "2014-12-20T21:17:56.891000Z",
            "url": "https://swapi.dev/api/people/1/"
        })
    }

    fn planet() -> serde_json::Value {
        json!({
            "name": "Tatooine",
            "climate": "arid",
            "diameter": "10465",
            "gravity": "1 standard",
            "orbital_period": "304",
            "population": "200000",
            "rotation_period": "23",
            "surface_water": "1",
            "terrain": "desert",
            "residents": ["https://swapi.dev/api/people/1/"],
            "films": [],
            "created": "2014-12-09T13:50:49.641000Z",
            "edited": "2014-12-20T20:58:18.411000Z",
            "url": "https://swapi.dev/api/planets/1/"
        })
    }

    #[test]
    fn unresolved_person() {
        let luke: Person =
            serde_json::from_value(person("Luke Skywalker", json!("https://swapi.dev/api/planets/1/")))
                .unwrap();
        assert_eq!(luke.homeworld.url(), Some("https://swapi.dev/api/planets/1/"));
        assert!(!luke.films.is_resolved());
        assert_eq!(luke.films.len(), 1);
    }

    #[test]
    fn resolved_homeworld() {
        let luke: Person = serde_json::from_value(person("Luke Skywalker", planet())).unwrap();
        assert!(luke.homeworld.is_resolved());
        assert_eq!(luke.homeworld.resolved().unwrap().name, "Tatooine");
    }

    #[test]
    fn starship_mglt_rename() {
        let value = json!({
            "name": "X-wing",
            "model": "T-65 X-wing",
            "manufacturer": "Incom Corporation",
            "cost_in_credits": "149999",
            "length": "12.5",
            "max_atmosphering_speed": "1050",
            "crew": "1",
            "passengers": "0",
            "cargo_capacity": "110",
            "consumables": "1 week",
            "hyperdrive_rating": "1.0",
            "MGLT": "100",
            "starship_class": "Starfighter",
            "pilots": [],
            "films": [],
            "created": "2014-12-12T11:19:05.340000Z",
            "edited": "2014-12-20T21:23:49.886000Z",
            "url": "https://swapi.dev/api/starships/12/"
        });
        let ship: Starship = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(ship.mglt, "100");
        assert_eq!(serde_json::to_value(&ship).unwrap()["MGLT"], "100");
    }

    fn film(episode_id: serde_json::Value) -> serde_json::Value {
        json!({
            "title": "A New Hope",
            "episode_id": episode_id,
            "opening_crawl": "It is a period of civil war.",
            "director": "George Lucas",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1977-05-25",
            "characters": ["https://swapi.dev/api/people/1/"],
            "planets": [],
            "species": [],
            "starships": [],
            "vehicles": [],
            "created": "2014-12-10T14:23:31.880000Z",
            "edited": "2014-12-20T19:49:45.256000Z",
            "url": "https://swapi.dev/api/films/1/"
        })
    }

    #[test]
    fn film_episode_as_number_or_string() {
        let numeric: Film = serde_json::from_value(film(json!(4))).unwrap();
        let text: Film = serde_json::from_value(film(json!("4"))).unwrap();

        assert_eq!(numeric.episode_id, 4);
        assert_eq!(text, numeric);
        assert_eq!(serde_json::to_value(&text).unwrap()["episode_id"], 4);

        assert!(serde_json::from_value::<Film>(film(json!("IV"))).is_err());
        assert!(serde_json::from_value::<Film>(film(json!(null))).is_err());
    }

    #[test]
    fn kind_markers() {
        assert_eq!(Films::KIND, ResourceKind::Films);
        assert_eq!(Species::KIND, ResourceKind::Species);
    }
}
