pub(crate) mod gradient;
pub(crate) mod model;
pub(crate) mod params;
pub(crate) mod presets;
