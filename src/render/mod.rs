pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod export;
pub(crate) mod gradient;
pub(crate) mod surface;
