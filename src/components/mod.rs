pub mod headline;
pub mod host;
pub mod neural_net;
pub mod paint;
pub mod tech_stack;
