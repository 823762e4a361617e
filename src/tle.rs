//! Two-Line Element set ingestion.
//!
//! Splits raw element text from CelesTrak into name/line1/line2 triplets.
//! No field or checksum validation happens here; a triplet that looks whole
//! is handed on and judged by the propagator at initialization time.

use thiserror::Error;

pub const STARLINK_TLE_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=starlink&FORMAT=tle";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(Box<ureq::Error>),
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
}

///One parsed element set: the display name plus the two fixed-width element
///lines, kept verbatim. Immutable once parsed; a fresh fetch replaces the
///whole set rather than updating records in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

///Walks the text in fixed strides of three lines. A triplet is emitted only
///when all three lines are non-empty after trimming; a trailing partial
///triplet is discarded without error.
pub fn parse_element_sets(text: &str) -> Vec<ElementSet> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sets = Vec::new();
    let mut i = 0;
    while i + 2 < lines.len() {
        let name = lines[i].trim();
        let line1 = lines[i + 1].trim();
        let line2 = lines[i + 2].trim();
        if !name.is_empty() && !line1.is_empty() && !line2.is_empty() {
            sets.push(ElementSet {
                name: name.to_string(),
                line1: line1.to_string(),
                line2: line2.to_string(),
            });
        }
        i += 3;
    }
    sets
}

pub(crate) fn fetch_text(url: &str) -> Result<String, FetchError> {
    let body = ureq::get(url)
        .call()
        .map_err(|e| FetchError::Transport(Box::new(e)))?
        .into_string()?;
    Ok(body)
}

///Fetches and parses an element feed. Transport failure surfaces once to the
///caller; retry policy belongs to whoever drives the fetch.
pub fn fetch_element_sets(url: &str) -> Result<Vec<ElementSet>, FetchError> {
    Ok(parse_element_sets(&fetch_text(url)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   25078.36999458  .00023040  00000+0  41584-3 0  9998";
    const ISS_LINE2: &str =
        "2 25544  51.6365  31.8868 0003892  28.0409 332.0788 15.49628144501233";

    fn triplet(name: &str) -> String {
        format!("{}\n{}\n{}", name, ISS_LINE1, ISS_LINE2)
    }

    #[test]
    fn test_parse_full_triplets() {
        let text = format!("{}\n{}", triplet("ISS (ZARYA)"), triplet("STARLINK-1007"));
        let sets = parse_element_sets(&text);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "ISS (ZARYA)");
        assert_eq!(sets[0].line1, ISS_LINE1);
        assert_eq!(sets[1].name, "STARLINK-1007");
    }

    #[test]
    fn test_trailing_partial_triplet_discarded() {
        //two full triplets plus two trailing lines
        let text = format!(
            "{}\n{}\nSTARLINK-1010\n{}",
            triplet("STARLINK-1008"),
            triplet("STARLINK-1009"),
            ISS_LINE1
        );
        let sets = parse_element_sets(&text);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].name, "STARLINK-1009");
    }

    #[test]
    fn test_record_count_is_floor_of_line_count() {
        let text = format!("{}\n{}\nlonely line", triplet("A"), triplet("B"));
        assert_eq!(parse_element_sets(&text).len(), 7 / 3);
    }

    #[test]
    fn test_blank_line_excludes_triplet() {
        let text = format!("{}\n   \n{}\n{}\n{}", triplet("A"), ISS_LINE1, ISS_LINE2, triplet("B"));
        let sets = parse_element_sets(&text);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "A");
        assert_eq!(sets[1].name, "B");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let text = format!("  NOISY NAME  \n  {}  \n  {}  ", ISS_LINE1, ISS_LINE2);
        let sets = parse_element_sets(&text);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "NOISY NAME");
        assert_eq!(sets[0].line2, ISS_LINE2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_element_sets("").is_empty());
        assert!(parse_element_sets("\n\n").is_empty());
    }
}
