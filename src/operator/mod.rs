pub(crate) mod cast;
pub(crate) mod color;
pub(crate) mod components;
pub(crate) mod constants;
pub(crate) mod geometry;
pub(crate) mod math;
pub(crate) mod random;
pub(crate) mod unify;
