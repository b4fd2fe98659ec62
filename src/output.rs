pub(crate) mod pdf;
pub(crate) mod raster;
pub(crate) mod svg;
