pub(crate) mod layout;
pub(crate) mod surface;
pub(crate) mod view;
