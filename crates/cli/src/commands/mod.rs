pub(crate) mod partition;
pub(crate) mod validate;
