//! SWC record parsing.
//!
//! An SWC file is line oriented. Lines whose first non-blank character is
//! `#` are comments; every other non-blank line is a record of seven
//! whitespace-separated fields:
//!
//! ```text
//! id type x y z radius parent
//! ```
//!
//! A negative parent marks the root of a sub-tree. Parsing is all or
//! nothing: the first bad record rejects the whole file, because the id
//! based indexing downstream needs a complete record set.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point3;
use tracing::debug;

use crate::error::{SwcError, SwcResult};
use crate::sample::{Sample, SampleType};

/// Number of fields in an SWC record.
pub const FIELD_COUNT: usize = 7;

/// The samples of one SWC file, split into soma and neurite views.
///
/// Both views keep file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwcDocument {
    samples: Vec<Sample>,
    soma: Vec<Sample>,
    neurites: Vec<Sample>,
}

impl SwcDocument {
    /// Build a document from samples in file order.
    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let (soma, neurites) = samples.iter().partition(|s| s.kind.is_soma());
        Self {
            samples,
            soma,
            neurites,
        }
    }

    /// Every sample in file order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Soma samples in file order.
    #[must_use]
    pub fn soma_samples(&self) -> &[Sample] {
        &self.soma
    }

    /// Axon, dendrite, glial and other non-soma samples in file order.
    #[must_use]
    pub fn neurite_samples(&self) -> &[Sample] {
        &self.neurites
    }

    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the file held no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Parse SWC text.
///
/// # Errors
///
/// Returns [`SwcError::MalformedRecord`] for the first record that does not
/// have seven fields, has an unparseable number, an unknown type code, a
/// non-positive id or a negative radius.
///
/// # Example
///
/// ```
/// use swc_io::parse_swc;
///
/// let doc = parse_swc("# soma\n1 1 0 0 0 5 -1\n2 3 0 10 0 1 1\n").unwrap();
/// assert_eq!(doc.soma_samples().len(), 1);
/// assert_eq!(doc.neurite_samples().len(), 1);
/// ```
pub fn parse_swc(text: &str) -> SwcResult<SwcDocument> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(sample) = parse_line(line, index + 1)? {
            samples.push(sample);
        }
    }
    finish(samples)
}

/// Read SWC records from any buffered reader.
///
/// # Errors
///
/// Returns an I/O error if reading fails, or the same record errors as
/// [`parse_swc`].
pub fn read_swc_from<R: BufRead>(reader: R) -> SwcResult<SwcDocument> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(sample) = parse_line(&line, index + 1)? {
            samples.push(sample);
        }
    }
    finish(samples)
}

/// Read an SWC file from disk.
///
/// # Errors
///
/// Returns [`SwcError::FileNotFound`] if the file does not exist, an I/O
/// error if it cannot be read, or the record errors of [`parse_swc`].
///
/// # Example
///
/// ```no_run
/// use swc_io::read_swc;
///
/// let doc = read_swc("neuron.swc").unwrap();
/// println!("{} samples", doc.len());
/// ```
pub fn read_swc<P: AsRef<Path>>(path: P) -> SwcResult<SwcDocument> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SwcError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SwcError::Io(e)
        }
    })?;
    read_swc_from(BufReader::new(file))
}

fn finish(samples: Vec<Sample>) -> SwcResult<SwcDocument> {
    let doc = SwcDocument::from_samples(samples);
    debug!(
        samples = doc.len(),
        soma = doc.soma_samples().len(),
        neurites = doc.neurite_samples().len(),
        "parsed SWC records"
    );
    Ok(doc)
}

/// Parse one physical line. Returns `Ok(None)` for blank and comment lines.
fn parse_line(line: &str, line_no: usize) -> SwcResult<Option<Sample>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() < FIELD_COUNT {
        return Err(SwcError::malformed(
            line_no,
            format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
        ));
    }
    if fields.len() > FIELD_COUNT {
        debug!(
            line = line_no,
            extra = fields.len() - FIELD_COUNT,
            "ignoring trailing fields"
        );
    }

    let id = parse_int(fields[0], "id", line_no)?;
    let id = u32::try_from(id)
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| SwcError::malformed(line_no, format!("id must be positive, got {id}")))?;

    let code = parse_int(fields[1], "type", line_no)?;
    let kind = SampleType::from_code(code)
        .ok_or_else(|| SwcError::malformed(line_no, format!("unknown type code {code}")))?;

    let x = parse_float(fields[2], "x", line_no)?;
    let y = parse_float(fields[3], "y", line_no)?;
    let z = parse_float(fields[4], "z", line_no)?;

    let radius = parse_float(fields[5], "radius", line_no)?;
    if radius < 0.0 {
        return Err(SwcError::malformed(
            line_no,
            format!("radius must be non-negative, got {radius}"),
        ));
    }

    let parent = parse_int(fields[6], "parent", line_no)?;
    let parent = if parent < 0 {
        None
    } else {
        Some(u32::try_from(parent).map_err(|_| {
            SwcError::malformed(line_no, format!("parent id {parent} out of range"))
        })?)
    };

    Ok(Some(Sample {
        id,
        kind,
        position: Point3::new(x, y, z),
        radius,
        parent,
        line: line_no,
    }))
}

fn parse_int(field: &str, name: &str, line_no: usize) -> SwcResult<i64> {
    field
        .parse::<i64>()
        .map_err(|e| SwcError::malformed(line_no, format!("invalid {name} '{field}': {e}")))
}

fn parse_float(field: &str, name: &str, line_no: usize) -> SwcResult<f64> {
    let value = field
        .parse::<f64>()
        .map_err(|e| SwcError::malformed(line_no, format!("invalid {name} '{field}': {e}")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SwcError::malformed(
            line_no,
            format!("{name} must be finite, got {field}"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PYRAMIDAL: &str = "\
# ORIGINAL_SOURCE test
# SCALE 1.0 1.0 1.0
1 1 0.0 0.0 0.0 5.0 -1
2 1 0.0 -5.0 0.0 5.0 1
3 1 0.0 5.0 0.0 5.0 1
4 3 -2.0 -6.0 0.0 1.2 1
5 3 -4.0 -12.0 0.5 1.0 4
6 4 0.0 8.0 0.0 2.0 3
";

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let doc = parse_swc(PYRAMIDAL).unwrap();
        assert_eq!(doc.len(), 6);
        assert_eq!(doc.samples()[0].line, 3);
        assert_eq!(doc.samples()[5].line, 8);
    }

    #[test]
    fn soma_and_neurites_are_split_in_file_order() {
        let doc = parse_swc(PYRAMIDAL).unwrap();
        let soma: Vec<u32> = doc.soma_samples().iter().map(|s| s.id).collect();
        let neurites: Vec<u32> = doc.neurite_samples().iter().map(|s| s.id).collect();
        assert_eq!(soma, vec![1, 2, 3]);
        assert_eq!(neurites, vec![4, 5, 6]);
    }

    #[test]
    fn fields_are_typed() {
        let doc = parse_swc(PYRAMIDAL).unwrap();
        let s = doc.samples()[4];
        assert_eq!(s.id, 5);
        assert_eq!(s.kind, SampleType::BasalDendrite);
        assert_relative_eq!(s.position.x, -4.0);
        assert_relative_eq!(s.position.y, -12.0);
        assert_relative_eq!(s.position.z, 0.5);
        assert_relative_eq!(s.radius, 1.0);
        assert_eq!(s.parent, Some(4));
        assert_eq!(doc.samples()[0].parent, None);
    }

    #[test]
    fn blank_and_indented_comment_lines_are_ignored() {
        let doc = parse_swc("\n   # indented comment\n\n1 2 0 0 0 1 -1\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.samples()[0].line, 4);
    }

    #[test]
    fn trailing_fields_are_tolerated() {
        let doc = parse_swc("1 2 0 0 0 1 -1 extra\n").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn integer_coordinates_parse() {
        let doc = parse_swc("1 2 1 2 3 1 -1\n").unwrap();
        assert_eq!(doc.samples()[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn any_negative_parent_is_a_root() {
        let doc = parse_swc("1 2 0 0 0 1 -2\n").unwrap();
        assert!(doc.samples()[0].is_root());
    }

    fn malformed_line(text: &str) -> usize {
        match parse_swc(text) {
            Err(SwcError::MalformedRecord { line, .. }) => line,
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn short_record_is_rejected_with_line() {
        assert_eq!(malformed_line("# c\n1 1 0 0 0 1 -1\n2 3 0 0 0 1\n"), 3);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_eq!(malformed_line("1 1 0 zero 0 1 -1\n"), 1);
        assert_eq!(malformed_line("1.5 1 0 0 0 1 -1\n"), 1);
        assert_eq!(malformed_line("1 1 0 0 0 1 x\n"), 1);
        assert_eq!(malformed_line("1 1 0 0 NaN 1 -1\n"), 1);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(malformed_line("0 1 0 0 0 1 -1\n"), 1);
        assert_eq!(malformed_line("1 9 0 0 0 1 -1\n"), 1);
        assert_eq!(malformed_line("1 0 0 0 0 1 -1\n"), 1);
        assert_eq!(malformed_line("1 2 0 0 0 -0.5 -1\n"), 1);
    }

    #[test]
    fn parsing_stops_at_first_error() {
        let err = parse_swc("1 2 0 0 0 1 -1\nbad\n2 2 0 0 0 1 1\nworse\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn reader_and_str_agree() {
        let from_str = parse_swc(PYRAMIDAL).unwrap();
        let from_reader = read_swc_from(PYRAMIDAL.as_bytes()).unwrap();
        assert_eq!(from_str, from_reader);
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        let doc = parse_swc("# only comments\n").unwrap();
        assert!(doc.is_empty());
        assert!(doc.neurite_samples().is_empty());
    }
}
