// Copyright @yucwang 2026

use crate::core::options::MeshOptions;
use crate::math::constants::Float;

use std::convert::TryFrom;
use std::fmt;
use std::str::SplitWhitespace;

/// One face corner: a vertex plus the texture coordinate used at that corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub texcoord: Option<usize>,
}

impl Corner {
    pub fn new(vertex: usize, texcoord: Option<usize>) -> Self {
        Self { vertex, texcoord }
    }
}

pub type Face = [Corner; 3];
pub type Tetrahedron = [usize; 4];

/// Flat arrays straight out of the text, indices already 0-based.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedMesh {
    pub vertices: Vec<Float>,
    pub texcoords: Vec<Float>,
    pub faces: Vec<Face>,
    pub tetrahedra: Vec<Tetrahedron>,
    pub skipped_directives: usize,
}

impl ParsedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len() / 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    InvalidFloat(String),
    NonFiniteFloat(String),
    InvalidIndex(String),
    NonPositiveIndex(i64),
    MissingTokens { directive: &'static str, expected: usize, found: usize },
    TooFewCorners(usize),
    PolygonNotAllowed(usize),
    WrongTetrahedronArity(usize),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidFloat(token) => write!(f, "invalid number '{}'", token),
            ParseErrorKind::NonFiniteFloat(token) => write!(f, "non-finite number '{}'", token),
            ParseErrorKind::InvalidIndex(token) => write!(f, "invalid index '{}'", token),
            ParseErrorKind::NonPositiveIndex(index) => write!(f, "index {} is not 1-based", index),
            ParseErrorKind::MissingTokens { directive, expected, found } =>
                write!(f, "'{}' expects {} values, found {}", directive, expected, found),
            ParseErrorKind::TooFewCorners(n) => write!(f, "face has {} corners, need at least 3", n),
            ParseErrorKind::PolygonNotAllowed(n) =>
                write!(f, "face has {} corners and polygon triangulation is disabled", n),
            ParseErrorKind::WrongTetrahedronArity(n) => write!(f, "tetrahedron has {} indices, need 4", n),
        }
    }
}

/// A malformed directive. `line` is 1-based, `content` the raw line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub content: String,
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} (in '{}')", self.line, self.kind, self.content)
    }
}

impl std::error::Error for ParseError {}

pub fn parse_tmesh(input: &str, options: &MeshOptions) -> Result<ParsedMesh, ParseError> {
    let mut parsed = ParsedMesh::default();

    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    for (idx, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fail = |kind: ParseErrorKind| ParseError {
            line: idx + 1,
            content: line.to_string(),
            kind,
        };

        let mut tokens = trimmed.split_whitespace();
        let directive = match tokens.next() {
            Some(d) => d,
            None => continue,
        };

        match directive {
            "v" => {
                let values = parse_floats(&mut tokens, "v", 3).map_err(fail)?;
                parsed.vertices.extend_from_slice(&values);
            }
            "vt" => {
                let values = parse_floats(&mut tokens, "vt", 2).map_err(fail)?;
                parsed.texcoords.extend_from_slice(&values);
            }
            "f" => {
                let corners = tokens.map(parse_corner).collect::<Result<Vec<_>, _>>().map_err(fail)?;
                if corners.len() < 3 {
                    return Err(fail(ParseErrorKind::TooFewCorners(corners.len())));
                }
                if corners.len() > 3 && !options.triangulate_polygons {
                    return Err(fail(ParseErrorKind::PolygonNotAllowed(corners.len())));
                }
                // Fan around the first corner.
                for i in 1..(corners.len() - 1) {
                    parsed.faces.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            "t" => {
                let indices = tokens.map(parse_index).collect::<Result<Vec<_>, _>>().map_err(fail)?;
                if indices.len() != 4 {
                    return Err(fail(ParseErrorKind::WrongTetrahedronArity(indices.len())));
                }
                parsed.tetrahedra.push([indices[0], indices[1], indices[2], indices[3]]);
            }
            other => {
                log::debug!("Skipping unknown directive '{}' on line {}.", other, idx + 1);
                parsed.skipped_directives += 1;
            }
        }
    }

    Ok(parsed)
}

fn parse_floats(tokens: &mut SplitWhitespace<'_>,
                directive: &'static str,
                expected: usize) -> Result<Vec<Float>, ParseErrorKind> {
    let mut values = Vec::with_capacity(expected);
    for token in tokens.by_ref().take(expected) {
        let value = token.parse::<Float>()
            .map_err(|_| ParseErrorKind::InvalidFloat(token.to_string()))?;
        if !value.is_finite() {
            return Err(ParseErrorKind::NonFiniteFloat(token.to_string()));
        }
        values.push(value);
    }
    if values.len() < expected {
        return Err(ParseErrorKind::MissingTokens { directive, expected, found: values.len() });
    }
    Ok(values)
}

// `vertex[/texcoord[/normal]]`; normals are not used by this format.
fn parse_corner(token: &str) -> Result<Corner, ParseErrorKind> {
    let mut fields = token.split('/');
    let vertex = parse_index(fields.next().unwrap_or(""))?;
    let texcoord = match fields.next() {
        Some(field) if !field.is_empty() => Some(parse_index(field)?),
        _ => None,
    };
    Ok(Corner::new(vertex, texcoord))
}

fn parse_index(token: &str) -> Result<usize, ParseErrorKind> {
    let index = token.parse::<i64>()
        .map_err(|_| ParseErrorKind::InvalidIndex(token.to_string()))?;
    if index < 1 {
        return Err(ParseErrorKind::NonPositiveIndex(index));
    }
    usize::try_from(index - 1).map_err(|_| ParseErrorKind::InvalidIndex(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_TRIANGLE: &str = "\
# a single tetrahedron face
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1

f 1/1 2/2 3/3
t 1 2 3 1
";

    #[test]
    fn test_parse_single_triangle() {
        let parsed = parse_tmesh(SINGLE_TRIANGLE, &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.vertex_count(), 3);
        assert_eq!(parsed.texcoord_count(), 3);
        assert_eq!(parsed.vertices, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(parsed.faces.len(), 1);
        assert_eq!(parsed.faces[0][1], Corner::new(1, Some(1)));
        assert_eq!(parsed.tetrahedra, vec![[0, 1, 2, 0]]);
        assert_eq!(parsed.skipped_directives, 0);
    }

    #[test]
    fn test_corner_index_conversion() {
        assert_eq!(parse_corner("5/2"), Ok(Corner::new(4, Some(1))));
        assert_eq!(parse_corner("5"), Ok(Corner::new(4, None)));
        assert_eq!(parse_corner("5//7"), Ok(Corner::new(4, None)));
        assert_eq!(parse_corner("5/3/7"), Ok(Corner::new(4, Some(2))));
        assert_eq!(parse_corner("0/1"), Err(ParseErrorKind::NonPositiveIndex(0)));
    }

    #[test]
    fn test_unknown_directives_are_skipped() {
        let input = "o thing\nv 1 2 3\nvn 0 0 1\ns off\n";
        let parsed = parse_tmesh(input, &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.vertex_count(), 1);
        assert_eq!(parsed.skipped_directives, 3);
    }

    #[test]
    fn test_comment_with_leading_whitespace() {
        let input = "   # v 1 2 3\n\t\nv 4 5 6\n";
        let parsed = parse_tmesh(input, &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.vertices, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_malformed_float_reports_line() {
        let input = "v 0 0 0\nv 1 abc 0\n";
        let err = parse_tmesh(input, &MeshOptions::default()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.content, "v 1 abc 0");
        assert_eq!(err.kind, ParseErrorKind::InvalidFloat("abc".to_string()));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let err = parse_tmesh("v 0 0 0\nv nan 0 0\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::NonFiniteFloat("nan".to_string()));

        let err = parse_tmesh("v 0 0 0\n\nvt inf 0\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, ParseErrorKind::NonFiniteFloat("inf".to_string()));

        let err = parse_tmesh("v 0 -inf 0\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.content, "v 0 -inf 0");
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let input = "\u{feff}v 1 2 3\nv 4 5 6\nf 1 2 2\n";
        let parsed = parse_tmesh(input, &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.vertex_count(), 2);
        assert_eq!(parsed.vertices[0], 1.0);
        assert_eq!(parsed.skipped_directives, 0);
    }

    #[test]
    fn test_index_beyond_u32_is_not_wrapped() {
        // Parses where usize is 64-bit; must never alias a small index.
        match parse_index("4294967297") {
            Ok(index) => assert_eq!(index as u64, 4294967296),
            Err(kind) => assert_eq!(kind, ParseErrorKind::InvalidIndex("4294967297".to_string())),
        }
        assert_eq!(parse_index("99999999999999999999"),
                   Err(ParseErrorKind::InvalidIndex("99999999999999999999".to_string())));
    }

    #[test]
    fn test_missing_tokens() {
        let err = parse_tmesh("vt 0.5\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingTokens { directive: "vt", expected: 2, found: 1 });
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let input = "f 1/1 2/2 3/3 4/4\n";
        let parsed = parse_tmesh(input, &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.faces.len(), 2);
        assert_eq!(parsed.faces[1][0].vertex, 0);
        assert_eq!(parsed.faces[1][1].vertex, 2);
        assert_eq!(parsed.faces[1][2].vertex, 3);

        let strict = MeshOptions { triangulate_polygons: false, ..MeshOptions::default() };
        let err = parse_tmesh(input, &strict).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::PolygonNotAllowed(4));
    }

    #[test]
    fn test_bad_faces_and_tetrahedra() {
        let err = parse_tmesh("f 1 2\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooFewCorners(2));

        let err = parse_tmesh("t 1 2 3\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::WrongTetrahedronArity(3));

        let err = parse_tmesh("\nt 1 2 x 4\n", &MeshOptions::default()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidIndex("x".to_string()));
    }

    #[test]
    fn test_no_cross_reference_validation() {
        let parsed = parse_tmesh("f 7 8 9\n", &MeshOptions::default()).expect("failed to parse");
        assert_eq!(parsed.faces[0][2], Corner::new(8, None));
    }
}
