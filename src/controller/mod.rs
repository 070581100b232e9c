#[allow(clippy::module_inception)]
pub(crate) mod controller;
pub(crate) mod descriptor;
pub(crate) mod observer;
pub(crate) mod state;
