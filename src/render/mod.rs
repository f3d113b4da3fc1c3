pub(crate) mod frame;
pub(crate) mod layout;
pub(crate) mod renderer;
pub(crate) mod text;
