pub(crate) mod data_uri;
pub(crate) mod decode;
pub(crate) mod loader;
pub(crate) mod upload;
