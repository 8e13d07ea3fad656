pub(crate) mod fill;
pub(crate) mod line;
