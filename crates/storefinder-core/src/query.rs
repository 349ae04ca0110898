/// The three pending search fields, kept as typed text.
///
/// Numeric format is not checked here; the backend owns that. Only presence
/// matters before a search is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    pub lat: String,
    pub lon: String,
    pub radius_km: String,
}

/// Names one of the [`QueryInput`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Lat,
    Lon,
    RadiusKm,
}

impl QueryField {
    /// Query-string parameter name for this field.
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            QueryField::Lat => "lat",
            QueryField::Lon => "lon",
            QueryField::RadiusKm => "radius_km",
        }
    }
}

impl std::fmt::Display for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param())
    }
}

impl QueryInput {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>, radius_km: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
            radius_km: radius_km.into(),
        }
    }

    /// Fields that are empty or whitespace-only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<QueryField> {
        [
            (QueryField::Lat, &self.lat),
            (QueryField::Lon, &self.lon),
            (QueryField::RadiusKm, &self.radius_km),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `(param, value)` pairs in the order the proxy expects them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, &str); 3] {
        [
            (QueryField::Lat.param(), self.lat.trim()),
            (QueryField::Lon.param(), self.lon.trim()),
            (QueryField::RadiusKm.param(), self.radius_km.trim()),
        ]
    }

    pub fn set(&mut self, field: QueryField, value: impl Into<String>) {
        let slot = match field {
            QueryField::Lat => &mut self.lat,
            QueryField::Lon => &mut self.lon,
            QueryField::RadiusKm => &mut self.radius_km,
        };
        *slot = value.into();
    }
}
