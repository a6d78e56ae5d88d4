pub(crate) mod advisor;
pub(crate) mod simulator;
