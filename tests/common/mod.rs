//! Common test utilities for integration tests

use std::fs;
use std::io::Write;
use std::path::Path;

/// Helper function to create a test KML file, creating parent directories
#[allow(dead_code)]
pub fn create_test_kml_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Wraps placemarks in the document header and footer of a tz_world export
#[allow(dead_code)]
pub fn kml_document(placemarks: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://earth.google.com/kml/2.2">
<Document>
  <name>tz_world</name>
{}</Document>
</kml>
"#,
        placemarks.concat()
    )
}

/// One placemark. With `multi`, the rings after the first are holes.
#[allow(dead_code)]
pub fn placemark(name: &str, rings: &[&str], multi: bool) -> String {
    let mut out = format!(
        r##"  <Placemark>
    <description><![CDATA[<table><tr><td>TZID</td><td><font COLOR="#000000">{name}</font></td></tr></table>]]></description>
"##
    );
    if multi {
        out.push_str("    <MultiGeometry>\n");
    }
    for ring in rings {
        out.push_str(&format!(
            "    <Polygon><outerBoundaryIs><LinearRing><coordinates>\n      {ring}\n    </coordinates></LinearRing></outerBoundaryIs></Polygon>\n"
        ));
    }
    if multi {
        out.push_str("    </MultiGeometry>\n");
    }
    out.push_str("  </Placemark>\n");
    out
}

#[allow(dead_code)]
pub const NEW_YORK_RING: &str =
    "-74.25,40.49,0 -73.70,40.49,0 -73.70,40.91,0 -74.25,40.91,0 -74.25,40.49,0";

#[allow(dead_code)]
pub const ITALY_RING: &str = "6.6,36.6,0 18.5,36.6,0 18.5,47.1,0 6.6,47.1,0 6.6,36.6,0";

/// Vatican City, cut out of the Italian polygon
#[allow(dead_code)]
pub const VATICAN_HOLE: &str = "12.445,41.900,0 12.458,41.900,0 12.458,41.907,0 12.445,41.900,0";

/// San Marino, cut out of the Italian polygon
#[allow(dead_code)]
pub const SAN_MARINO_HOLE: &str = "12.40,43.89,0 12.52,43.89,0 12.52,43.99,0 12.40,43.89,0";

#[allow(dead_code)]
pub const ALASKA_MAINLAND: &str = "-168.0,54.0,0 -141.0,54.0,0 -141.0,71.0,0 -168.0,54.0,0";

#[allow(dead_code)]
pub const ALASKA_ISLAND: &str = "-170.5,57.1,0 -170.0,57.1,0 -170.0,57.3,0 -170.5,57.1,0";

/// Sample document: New York, Italy with two holes, Anchorage split in two
#[allow(dead_code)]
pub fn sample_document() -> String {
    kml_document(&[
        placemark("America/New_York", &[NEW_YORK_RING], false),
        placemark(
            "Europe/Rome",
            &[ITALY_RING, VATICAN_HOLE, SAN_MARINO_HOLE],
            true,
        ),
        placemark("America/Anchorage", &[ALASKA_MAINLAND], false),
        placemark("America/Anchorage", &[ALASKA_ISLAND], false),
    ])
}
