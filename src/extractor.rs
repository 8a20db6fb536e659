use crate::constants::*;
use crate::errors::{AppError, AppResult};
use crate::models::{Point, Ring, TimezoneRecord};
use crate::progress::{ProgressEvent, ProgressSink};

/// What the scanner is looking for next. One full cycle produces one record.
enum ScanState {
    SeekingName,
    SeekingInclude { name: String },
    SeekingExcludes { name: String, include: Ring },
}

/// Forward-only scanner over a timezone KML document.
///
/// The document is not parsed as XML. The scanner searches for the fixed
/// marker tokens in [`crate::constants`] and relies on the producer always
/// laying a placemark out as:
///
/// ```text
/// ... TZID ... <font COLOR="..."> name </font> ... [<MultiGeometry>] ...
/// <coordinates> lon,lat[,alt] ... </coordinates>   (include)
/// <coordinates> ... </coordinates>                 (excludes, multi only)
/// ```
///
/// If the producer changes that layout, extraction either stops early or
/// fails with a malformed-data error.
pub struct BoundaryExtractor<'a> {
    document: &'a str,
    pos: usize,
}

impl<'a> BoundaryExtractor<'a> {
    pub fn new(document: &'a str) -> Self {
        Self { document, pos: 0 }
    }

    /// Current byte offset of the scan cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scans the whole document and returns every record in document order.
    ///
    /// Names are not merged: a timezone made of disjoint areas comes back as
    /// several records with the same name. The scan ends normally when no
    /// further name marker exists, or when a trailing record is cut off before
    /// its name wrapper or coordinate block opens. Reports
    /// [`ProgressEvent::RegionsLoaded`] once done.
    ///
    /// # Errors
    ///
    /// Returns a malformed-data error (see [`AppError::is_malformed_data`]) if an
    /// opened name wrapper or coordinate block is never closed, the name is
    /// empty, a coordinate block is empty, or a coordinate field is not a
    /// finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use tzkml2json::extractor::BoundaryExtractor;
    /// use tzkml2json::progress::ProgressEvent;
    ///
    /// let kml = r##"<td>TZID</td><td><font COLOR="#000">Etc/Test</font></td>
    /// <coordinates>1.0,2.0,0 3.0,4.0,0 1.0,2.0,0</coordinates>"##;
    ///
    /// let records = BoundaryExtractor::new(kml)
    ///     .extract_all(&mut |_: ProgressEvent| {})
    ///     .unwrap();
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].name, "Etc/Test");
    /// assert_eq!(records[0].include.len(), 3);
    /// ```
    pub fn extract_all(mut self, progress: &mut dyn ProgressSink) -> AppResult<Vec<TimezoneRecord>> {
        let mut records = Vec::new();
        let mut exclude_count = 0;
        let mut state = ScanState::SeekingName;

        loop {
            state = match state {
                ScanState::SeekingName => match self.next_name()? {
                    Some(name) => ScanState::SeekingInclude { name },
                    None => break,
                },
                ScanState::SeekingInclude { name } => {
                    let Some((include, multi)) = self.next_include()? else {
                        break;
                    };
                    if multi {
                        ScanState::SeekingExcludes { name, include }
                    } else {
                        records.push(TimezoneRecord::new(name, include, Vec::new()));
                        ScanState::SeekingName
                    }
                }
                ScanState::SeekingExcludes { name, include } => {
                    let excludes = self.collect_excludes()?;
                    exclude_count += excludes.len();
                    records.push(TimezoneRecord::new(name, include, excludes));
                    ScanState::SeekingName
                }
            };
        }

        progress.report(ProgressEvent::RegionsLoaded {
            includes: records.len(),
            excludes: exclude_count,
        });
        Ok(records)
    }

    fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        self.document.get(from..)?.find(needle).map(|i| from + i)
    }

    fn require_from(&self, tag: &'static str, from: usize) -> AppResult<usize> {
        self.find_from(tag, from)
            .ok_or(AppError::MissingTag { tag, offset: from })
    }

    /// `None` when no complete name opening is left, which ends the scan.
    fn next_name(&mut self) -> AppResult<Option<String>> {
        let Some(marker) = self.find_from(NAME_MARKER, self.pos) else {
            return Ok(None);
        };
        let Some(wrapper) = self.find_from(NAME_WRAPPER_OPEN, marker + NAME_MARKER.len()) else {
            return Ok(None);
        };
        let Some(open_end) = self.find_from(NAME_WRAPPER_OPEN_END, wrapper + NAME_WRAPPER_OPEN.len())
        else {
            return Ok(None);
        };
        let start = open_end + NAME_WRAPPER_OPEN_END.len();
        let end = self.require_from(NAME_WRAPPER_CLOSE, start)?;

        let name = self.document[start..end].trim();
        if name.is_empty() {
            return Err(AppError::EmptyName { offset: start });
        }
        self.pos = end + NAME_WRAPPER_CLOSE.len();
        Ok(Some(name.to_string()))
    }

    /// Reads the first ring after a name. The flag is set when a multi-geometry
    /// marker sits between the name and that ring. `None` when no coordinate
    /// block opens after the name.
    fn next_include(&mut self) -> AppResult<Option<(Ring, bool)>> {
        let Some(open) = self.find_from(COORDINATES_OPEN, self.pos) else {
            return Ok(None);
        };
        let multi = self.document[self.pos..open].contains(MULTI_GEOMETRY);
        let ring = self.read_block(open)?;
        Ok(Some((ring, multi)))
    }

    /// Parses the coordinate block opening at `open` and moves past its closing tag.
    fn read_block(&mut self, open: usize) -> AppResult<Ring> {
        let body_start = open + COORDINATES_OPEN.len();
        let body_end = self.require_from(COORDINATES_CLOSE, body_start)?;
        let ring = parse_ring(&self.document[body_start..body_end], body_start)?;
        self.pos = body_end + COORDINATES_CLOSE.len();
        Ok(ring)
    }

    /// Start of the last closing coordinate tag before the next name marker.
    fn exclude_boundary(&self) -> Option<usize> {
        let next_name = self
            .find_from(NAME_MARKER, self.pos)
            .unwrap_or(self.document.len());
        self.document[self.pos..next_name]
            .rfind(COORDINATES_CLOSE)
            .map(|i| self.pos + i)
    }

    fn collect_excludes(&mut self) -> AppResult<Vec<Ring>> {
        let mut excludes = Vec::new();
        let Some(end) = self.exclude_boundary() else {
            return Ok(excludes);
        };

        while self.pos < end {
            let Some(open) = self.document[self.pos..end]
                .find(COORDINATES_OPEN)
                .map(|i| self.pos + i)
            else {
                break;
            };
            excludes.push(self.read_block(open)?);
        }
        Ok(excludes)
    }
}

/// Parses the whitespace-separated body of a coordinate block.
///
/// `offset` is the byte position of `text` in the document, used in errors.
pub fn parse_ring(text: &str, offset: usize) -> AppResult<Ring> {
    let ring = text
        .split_whitespace()
        .map(|token| parse_point(token, offset))
        .collect::<AppResult<Ring>>()?;

    if ring.is_empty() {
        return Err(AppError::EmptyRing { offset });
    }
    Ok(ring)
}

/// Parses a `lon,lat` or `lon,lat,alt` token. The altitude is dropped unread.
pub fn parse_point(token: &str, offset: usize) -> AppResult<Point> {
    let field_count = token.matches(COORDINATE_SEPARATOR).count() + 1;
    if !(MIN_COORDINATE_FIELDS..=MAX_COORDINATE_FIELDS).contains(&field_count) {
        return Err(malformed(
            token,
            offset,
            format!(
                "expected {MIN_COORDINATE_FIELDS} or {MAX_COORDINATE_FIELDS} fields, found {field_count}"
            ),
        ));
    }

    let mut fields = token.split(COORDINATE_SEPARATOR);
    let lon = parse_component(fields.next().unwrap_or_default(), token, offset)?;
    let lat = parse_component(fields.next().unwrap_or_default(), token, offset)?;
    Ok(Point::new(lon, lat))
}

fn parse_component(field: &str, token: &str, offset: usize) -> AppResult<f64> {
    let value: f64 = field
        .parse()
        .map_err(|e: std::num::ParseFloatError| malformed(token, offset, e.to_string()))?;
    if !value.is_finite() {
        return Err(malformed(token, offset, "value is not finite".to_string()));
    }
    Ok(value)
}

fn malformed(token: &str, offset: usize, reason: String) -> AppError {
    AppError::MalformedCoordinate {
        token: token.to_string(),
        offset,
        reason,
    }
}
