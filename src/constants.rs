// Marker tokens of the timezone KML export. The scanner relies on this exact
// vocabulary; any drift in the producer format breaks extraction.

/// Label that precedes every timezone name.
pub const NAME_MARKER: &str = "TZID";
/// Opening of the styled-text wrapper around the name, up to its attributes.
pub const NAME_WRAPPER_OPEN: &str = "<font COLOR=";
/// End of the wrapper's opening tag.
pub const NAME_WRAPPER_OPEN_END: &str = ">";
pub const NAME_WRAPPER_CLOSE: &str = "</font>";

pub const COORDINATES_OPEN: &str = "<coordinates>";
pub const COORDINATES_CLOSE: &str = "</coordinates>";

/// Present between a name and its first ring when the timezone carries holes.
pub const MULTI_GEOMETRY: &str = "<MultiGeometry>";

// Coordinate token layout: lon,lat[,alt]
pub const COORDINATE_SEPARATOR: char = ',';
pub const MIN_COORDINATE_FIELDS: usize = 2;
pub const MAX_COORDINATE_FIELDS: usize = 3;

// Output naming
pub const OUTPUT_EXTENSION: &str = "json";
pub const PATH_SEPARATOR_REPLACEMENT: &str = "_";

pub const DEFAULT_LOG_LEVEL: &str = "info";
