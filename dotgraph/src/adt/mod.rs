//! Abstract data types that are used by the graph model.

pub mod map;
