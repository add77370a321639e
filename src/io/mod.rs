// Copyright @yucwang 2021

pub mod text_source;
pub mod tmesh;
