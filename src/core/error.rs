// Copyright @yucwang 2026

use crate::io::text_source::FetchError;
use crate::io::tmesh::ParseError;

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndexedElement {
    FaceVertex,
    FaceTexCoord,
    TetrahedronVertex,
}

impl fmt::Display for IndexedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexedElement::FaceVertex => write!(f, "face"),
            IndexedElement::FaceTexCoord => write!(f, "face texcoord of"),
            IndexedElement::TetrahedronVertex => write!(f, "tetrahedron"),
        }
    }
}

/// A face or tetrahedron pointing past the parsed arrays. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfRangeIndexError {
    pub element: IndexedElement,
    pub element_index: usize,
    pub index: usize,
    pub bound: usize,
}

impl fmt::Display for OutOfRangeIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} references index {} but only {} are defined",
               self.element, self.element_index, self.index, self.bound)
    }
}

impl std::error::Error for OutOfRangeIndexError {}

#[derive(Debug)]
pub enum LoadError {
    Fetch(FetchError),
    Parse(ParseError),
    OutOfRange(OutOfRangeIndexError),
}

impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        LoadError::Fetch(err)
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

impl From<OutOfRangeIndexError> for LoadError {
    fn from(err: OutOfRangeIndexError) -> Self {
        LoadError::OutOfRange(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch(err) => write!(f, "fetch error: {}", err),
            LoadError::Parse(err) => write!(f, "parse error: {}", err),
            LoadError::OutOfRange(err) => write!(f, "index error: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch(err) => Some(err),
            LoadError::Parse(err) => Some(err),
            LoadError::OutOfRange(err) => Some(err),
        }
    }
}
