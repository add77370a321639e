// Copyright @yucwang 2021

pub mod adjacency;
pub mod buffers;
pub mod error;
pub mod loader;
pub mod mesh;
pub mod normals;
pub mod options;
