pub(crate) mod decorate;
pub(crate) mod engine;
pub(crate) mod geometry;
pub(crate) mod labels;
