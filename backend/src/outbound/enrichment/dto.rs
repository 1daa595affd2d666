//! DTOs for decoding enrichment service responses.
//!
//! Each service echoes the queried name and a count next to its estimate;
//! only the estimate is decoded. A `null` estimate means the service knows
//! nothing about the name.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct AgeDto {
    pub(super) age: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenderDto {
    pub(super) gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NationalityDto {
    #[serde(default)]
    pub(super) country: Vec<CountryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CountryDto {
    pub(super) country_id: String,
    pub(super) probability: f64,
}

impl NationalityDto {
    /// Country id with the highest probability; the first wins on ties.
    pub(super) fn most_probable(self) -> Option<String> {
        self.country
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.probability > best.probability {
                    candidate
                } else {
                    best
                }
            })
            .map(|country| country.country_id)
    }
}
