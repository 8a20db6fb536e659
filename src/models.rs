use serde::{Deserialize, Serialize, Serializer};

/// A `(longitude, latitude)` position. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.lon, point.lat)
    }
}

/// Closed polygon boundary, points in source order.
pub type Ring = Vec<Point>;

/// One geometry of a timezone: the outer boundary plus the holes cut out of it.
///
/// A timezone split across disjoint areas yields several records sharing the
/// same `name`. To test whether a point lies in the record, a consumer checks
/// `contains(include) && !excludes.any(contains)`.
///
/// On the wire a record is the tuple `[name, include, excludes]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(String, Ring, Vec<Ring>)")]
pub struct TimezoneRecord {
    pub name: String,
    pub include: Ring,
    pub excludes: Vec<Ring>,
}

impl TimezoneRecord {
    pub fn new(name: String, include: Ring, excludes: Vec<Ring>) -> Self {
        Self {
            name,
            include,
            excludes,
        }
    }
}

impl From<(String, Ring, Vec<Ring>)> for TimezoneRecord {
    fn from((name, include, excludes): (String, Ring, Vec<Ring>)) -> Self {
        Self::new(name, include, excludes)
    }
}

// Hand-written so large rings are not cloned into a tuple just to be encoded.
impl Serialize for TimezoneRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.name, &self.include, &self.excludes).serialize(serializer)
    }
}
